//! Membership index over collection-valued attributes (component D).
//!
//! Grounded on odex's `InvertedIndex` (`odex/index.py`): the attribute holds
//! a collection on every object, and the index maps each *member* of that
//! collection back to the objects containing it, serving `<literal> IN
//! <attribute>` conditions.

use super::{AttrSide, HashIndex, Index, IndexMatch};
use crate::condition::{BinOpKind, Condition};
use crate::error::Error;
use crate::plan::Range;
use crate::value::Value;
use std::hash::Hash;

pub struct InvertedIndex<T> {
    attribute: String,
    members: HashIndex<T>,
}

impl<T: Clone + Eq + Hash> InvertedIndex<T> {
    #[must_use]
    pub fn new(attribute: impl Into<String>) -> Self {
        InvertedIndex {
            attribute: attribute.into(),
            members: HashIndex::new("__members__"),
        }
    }

    fn members_of(value: &Value) -> &[Value] {
        match value {
            Value::List(items) => items.as_slice(),
            _ => &[],
        }
    }
}

impl<T: Clone + Eq + Hash> Index<T> for InvertedIndex<T> {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn kind_name(&self) -> &'static str {
        "InvertedIndex"
    }

    fn add(&self, obj: T, value: &Value) {
        for member in Self::members_of(value) {
            self.members.add(obj.clone(), member);
        }
    }

    fn remove(&self, obj: &T, value: &Value) {
        for member in Self::members_of(value) {
            self.members.remove(obj, member);
        }
    }

    fn lookup(&self, value: &Value) -> Vec<T> {
        self.members.lookup(value)
    }

    fn range(&self, _range: &Range<Value>) -> Result<Vec<T>, Error> {
        Err(Error::UnsupportedIndexOperation {
            index: self.describe(),
            operation: "range",
        })
    }

    fn match_condition(&self, kind: BinOpKind, side: AttrSide, operand: &Condition) -> Option<IndexMatch> {
        if kind != BinOpKind::In || side != AttrSide::Right {
            return None;
        }
        operand.as_literal().map(|v| IndexMatch::Lookup(v.clone()))
    }
}
