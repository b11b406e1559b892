//! Equality index (component D).
//!
//! Grounded on odex's `HashIndex` (`odex/index.py`): a plain map from
//! attribute value to the objects that hold it, used for `Eq` and, when the
//! operand is a literal `Array`, `In`.

use super::{AttrSide, Index, IndexMatch};
use crate::condition::{BinOpKind, Condition};
use crate::error::Error;
use crate::plan::Range;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;

pub struct HashIndex<T> {
    attribute: String,
    buckets: RefCell<HashMap<Value, Vec<T>>>,
}

impl<T: Clone + Eq + Hash> HashIndex<T> {
    #[must_use]
    pub fn new(attribute: impl Into<String>) -> Self {
        HashIndex {
            attribute: attribute.into(),
            buckets: RefCell::new(HashMap::new()),
        }
    }
}

impl<T: Clone + Eq + Hash> Index<T> for HashIndex<T> {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn kind_name(&self) -> &'static str {
        "HashIndex"
    }

    fn add(&self, obj: T, value: &Value) {
        self.buckets
            .borrow_mut()
            .entry(value.clone())
            .or_default()
            .push(obj);
    }

    fn remove(&self, obj: &T, value: &Value) {
        if let Some(bucket) = self.buckets.borrow_mut().get_mut(value) {
            bucket.retain(|o| o != obj);
        }
    }

    fn lookup(&self, value: &Value) -> Vec<T> {
        self.buckets
            .borrow()
            .get(value)
            .cloned()
            .unwrap_or_default()
    }

    fn range(&self, _range: &Range<Value>) -> Result<Vec<T>, Error> {
        Err(Error::UnsupportedIndexOperation {
            index: self.describe(),
            operation: "range",
        })
    }

    fn match_condition(&self, kind: BinOpKind, side: AttrSide, operand: &Condition) -> Option<IndexMatch> {
        match kind {
            BinOpKind::Eq => operand.as_literal().map(|v| IndexMatch::Lookup(v.clone())),
            BinOpKind::In if side == AttrSide::Left => operand.as_array().and_then(|items| {
                let values: Option<Vec<Value>> =
                    items.iter().map(|c| c.as_literal().cloned()).collect();
                values.map(IndexMatch::UnionOfLookups)
            }),
            _ => None,
        }
    }
}
