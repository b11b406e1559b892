//! The collection facade (component H): owns objects, a multi-index
//! registry, and the pluggable parser/planner/optimizer that together turn
//! a condition into a result set.
//!
//! Grounded on odex's `IndexedSet` (`odex/set.py`): constructor injection of
//! `parser`/`planner`/`optimizer`, `add`/`discard`/`update`/
//! `difference_update` keeping every registered index in sync with
//! `self.objects`, and `getattr` delegating to a per-attribute callable
//! (`odex/context.py`'s `Attributes`).

use crate::condition::Condition;
use crate::container::ByAddress;
use crate::error::Error;
use crate::exec::{self, Getter};
use crate::index::{Index, IndexRegistry};
use crate::optimizer::Chain;
use crate::parse::{DefaultParser, Parser};
use crate::plan::Plan;
use crate::planner::{DefaultPlanner, Planner};
use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

type AttrFn<Obj> = Box<dyn Fn(&Obj) -> Value>;

pub struct IndexedSet<Obj> {
    objects: Vec<ByAddress<Obj>>,
    indexes: IndexRegistry<ByAddress<Obj>>,
    attrs: HashMap<String, AttrFn<Obj>>,
    parser: Box<dyn Parser>,
    planner: Box<dyn Planner<ByAddress<Obj>>>,
    optimizer: Chain<ByAddress<Obj>>,
}

impl<Obj> IndexedSet<Obj> {
    /// `attrs` maps an attribute name to a function reading that attribute
    /// off an object; this is the only way the set (and everything it
    /// builds: indexes, the matcher) ever reads an object's fields.
    #[must_use]
    pub fn new(attrs: HashMap<String, AttrFn<Obj>>) -> Self {
        IndexedSet {
            objects: Vec::new(),
            indexes: HashMap::new(),
            attrs,
            parser: Box::new(DefaultParser),
            planner: Box::new(DefaultPlanner),
            optimizer: Chain::default_rules(),
        }
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_planner(mut self, planner: Box<dyn Planner<ByAddress<Obj>>>) -> Self {
        self.planner = planner;
        self
    }

    #[must_use]
    pub fn with_optimizer(mut self, optimizer: Chain<ByAddress<Obj>>) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Register an index over one attribute, backfilling it with every
    /// object already in the set.
    pub fn register_index(&mut self, index: Rc<dyn Index<ByAddress<Obj>>>) {
        let attribute = index.attribute().to_string();
        for obj in &self.objects {
            let value = self.get(obj, &attribute);
            index.add(obj.clone(), &value);
        }
        self.indexes.entry(attribute).or_default().push(index);
    }

    pub fn add(&mut self, obj: Obj) -> ByAddress<Obj> {
        let handle = ByAddress::new(obj);
        for index in self.indexes.values().flatten() {
            let value = self.get(&handle, index.attribute());
            index.add(handle.clone(), &value);
        }
        self.objects.push(handle.clone());
        handle
    }

    pub fn discard(&mut self, handle: &ByAddress<Obj>) {
        for index in self.indexes.values().flatten() {
            let value = self.get(handle, index.attribute());
            index.remove(handle, &value);
        }
        self.objects.retain(|o| o != handle);
    }

    pub fn update(&mut self, objs: impl IntoIterator<Item = Obj>) {
        for obj in objs {
            self.add(obj);
        }
    }

    pub fn difference_update<'a>(&mut self, handles: impl IntoIterator<Item = &'a ByAddress<Obj>>)
    where
        Obj: 'a,
    {
        for handle in handles {
            self.discard(handle);
        }
    }

    #[must_use]
    pub fn contains(&self, handle: &ByAddress<Obj>) -> bool {
        self.objects.contains(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ByAddress<Obj>> {
        self.objects.iter()
    }

    #[must_use]
    pub fn plan(&self, condition: &Condition) -> Plan<ByAddress<Obj>> {
        self.planner.plan(condition)
    }

    #[must_use]
    pub fn optimize(&self, plan: Plan<ByAddress<Obj>>) -> Plan<ByAddress<Obj>> {
        self.optimizer.optimize(plan, &self.indexes)
    }

    pub fn execute(&self, plan: &Plan<ByAddress<Obj>>) -> Result<Vec<ByAddress<Obj>>, Error> {
        exec::execute(plan, &self.objects, self)
    }

    /// Parse, plan, optimize, and execute a condition string in one call.
    pub fn filter(&self, condition_str: &str) -> Result<Vec<ByAddress<Obj>>, Error> {
        let condition = self.parser.parse(condition_str)?;
        self.filter_condition(&condition)
    }

    /// Same as [`Self::filter`], taking an already-built [`Condition`]
    /// (the fluent-builder entry point).
    pub fn filter_condition(&self, condition: &Condition) -> Result<Vec<ByAddress<Obj>>, Error> {
        let plan = self.optimize(self.plan(condition));
        self.execute(&plan)
    }
}

impl<Obj> Getter<ByAddress<Obj>> for IndexedSet<Obj> {
    fn get(&self, obj: &ByAddress<Obj>, attribute: &str) -> Value {
        self.attrs
            .get(attribute)
            .map_or(Value::Null, |f| f(obj))
    }
}
