//! Rule-based plan rewriting (component F).
//!
//! Grounded on odex's `optimize.Chain` (`odex/optimize.py`): an ordered list
//! of rewrite rules applied once each, in sequence, each rule itself doing a
//! bottom-up `plan.transform`. `OrderIntersects` is carried over from the
//! original implementation even though the distilled spec only names the
//! first four; it is the rule that makes `UseIndex`'s rewrites actually pay
//! off by scanning the cheapest branch of an `Intersect` first.

pub mod rules;

use crate::index::IndexRegistry;
use crate::plan::Plan;

/// One rewrite step in the optimizer chain.
pub trait Rule<T> {
    fn name(&self) -> &'static str;
    fn apply(&self, plan: Plan<T>, indexes: &IndexRegistry<T>) -> Plan<T>;
}

/// An ordered sequence of rules, applied once each.
pub struct Chain<T> {
    rules: Vec<Box<dyn Rule<T>>>,
}

impl<T> Chain<T> {
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule<T>>>) -> Self {
        Chain { rules }
    }

    #[must_use]
    pub fn default_rules() -> Self {
        Chain::new(vec![
            Box::new(rules::MergeSetOps),
            Box::new(rules::UseIndex),
            Box::new(rules::CombineRanges),
            Box::new(rules::CombineFilters),
            Box::new(rules::OrderIntersects),
        ])
    }

    pub fn optimize(&self, mut plan: Plan<T>, indexes: &IndexRegistry<T>) -> Plan<T> {
        for rule in &self.rules {
            plan = rule.apply(plan, indexes);
            #[cfg(feature = "trace")]
            eprintln!("[trace] after {}:\n{plan}", rule.name());
        }
        plan
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::default_rules()
    }
}
