//! Range index (component D).
//!
//! Grounded on odex's `SortedDictIndex` (`odex/index.py`), which subclasses
//! `HashIndex` for `Eq`/`In` and layers a `sortedcontainers.SortedDict` on
//! top for comparisons. Rust's `BTreeMap` plays the same role; composition
//! stands in for the Python subclass since Rust has no inheritance.

use super::{AttrSide, HashIndex, Index, IndexMatch};
use crate::condition::{BinOpKind, Condition};
use crate::error::Error;
use crate::plan::{Bound, Range};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::hash::Hash;
use std::ops::Bound as StdBound;

pub struct SortedIndex<T> {
    attribute: String,
    hash: HashIndex<T>,
    sorted: RefCell<BTreeMap<Value, Vec<T>>>,
}

impl<T: Clone + Eq + Hash> SortedIndex<T> {
    #[must_use]
    pub fn new(attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        SortedIndex {
            hash: HashIndex::new(attribute.clone()),
            attribute,
            sorted: RefCell::new(BTreeMap::new()),
        }
    }

    fn to_std_bound(bound: &Bound<Value>) -> StdBound<Value> {
        match bound {
            Bound::Unset => StdBound::Unbounded,
            Bound::Value(v, true) => StdBound::Included(v.clone()),
            Bound::Value(v, false) => StdBound::Excluded(v.clone()),
        }
    }
}

impl<T: Clone + Eq + Hash> Index<T> for SortedIndex<T> {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn kind_name(&self) -> &'static str {
        "SortedIndex"
    }

    fn add(&self, obj: T, value: &Value) {
        self.hash.add(obj.clone(), value);
        self.sorted
            .borrow_mut()
            .entry(value.clone())
            .or_default()
            .push(obj);
    }

    fn remove(&self, obj: &T, value: &Value) {
        self.hash.remove(obj, value);
        if let Some(bucket) = self.sorted.borrow_mut().get_mut(value) {
            bucket.retain(|o| o != obj);
        }
    }

    fn lookup(&self, value: &Value) -> Vec<T> {
        self.hash.lookup(value)
    }

    fn range(&self, range: &Range<Value>) -> Result<Vec<T>, Error> {
        let lower = Self::to_std_bound(&range.left);
        let upper = Self::to_std_bound(&range.right);
        Ok(self
            .sorted
            .borrow()
            .range((lower, upper))
            .flat_map(|(_, objs)| objs.iter().cloned())
            .collect())
    }

    fn match_condition(&self, kind: BinOpKind, side: AttrSide, operand: &Condition) -> Option<IndexMatch> {
        let is_comparison = matches!(
            kind,
            BinOpKind::Lt | BinOpKind::Le | BinOpKind::Gt | BinOpKind::Ge
        );
        if !is_comparison {
            return self.hash.match_condition(kind, side, operand);
        }

        let effective = if side == AttrSide::Right {
            kind.inverse_comparison().unwrap_or(kind)
        } else {
            kind
        };
        let value = operand.as_literal()?.clone();
        let range = match effective {
            BinOpKind::Lt => Range::at_most(value, false),
            BinOpKind::Le => Range::at_most(value, true),
            BinOpKind::Gt => Range::at_least(value, false),
            BinOpKind::Ge => Range::at_least(value, true),
            _ => unreachable!(),
        };
        Some(IndexMatch::Range(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::literal;

    fn populated() -> SortedIndex<i64> {
        let idx: SortedIndex<i64> = SortedIndex::new("a");
        idx.add(1, &Value::Int(1));
        idx.add(2, &Value::Int(2));
        idx.add(3, &Value::Int(3));
        idx.add(4, &Value::Int(4));
        idx
    }

    #[test]
    fn range_respects_inclusivity() {
        let idx = populated();
        let range = Range::at_least(Value::Int(1), false).combine(&Range::at_most(Value::Int(4), true)).unwrap();
        let mut found = idx.range(&range).unwrap();
        found.sort_unstable();
        assert_eq!(found, vec![2, 3, 4]);
    }

    #[test]
    fn match_condition_builds_range_for_gt() {
        let idx = populated();
        let m = idx.match_condition(BinOpKind::Gt, AttrSide::Left, &literal(1));
        assert_eq!(m, Some(IndexMatch::Range(Range::at_least(Value::Int(1), false))));
    }

    #[test]
    fn match_condition_inverts_comparison_when_attribute_is_on_the_right() {
        let idx = populated();
        // "5 > a" means a < 5.
        let m = idx.match_condition(BinOpKind::Gt, AttrSide::Right, &literal(5));
        assert_eq!(m, Some(IndexMatch::Range(Range::at_most(Value::Int(5), false))));
    }

    #[test]
    fn match_condition_still_serves_eq_via_inherited_hash_behavior() {
        let idx = populated();
        let m = idx.match_condition(BinOpKind::Eq, AttrSide::Left, &literal(2));
        assert_eq!(m, Some(IndexMatch::Lookup(Value::Int(2))));
    }
}
