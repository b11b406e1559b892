//! Grounded on odex's `UseIndex` (`odex/optimize.py`): for every `ScanFilter`
//! whose condition names exactly one attribute, probe that attribute's
//! registered indexes in registration order and rewrite to the first one
//! that claims the condition.

use crate::condition::{BinOpKind, Condition};
use crate::index::{AttrSide, Index, IndexMatch, IndexRegistry};
use crate::optimizer::Rule;
use crate::plan::Plan;
use std::rc::Rc;

pub struct UseIndex;

impl<T> Rule<T> for UseIndex {
    fn name(&self) -> &'static str {
        "UseIndex"
    }

    fn apply(&self, plan: Plan<T>, indexes: &IndexRegistry<T>) -> Plan<T> {
        plan.transform(&mut |node| {
            let Plan::ScanFilter(condition) = &node else {
                return node;
            };
            let Some((name, kind, side, operand)) = extract_attribute(condition) else {
                return node;
            };
            let Some(candidates) = indexes.get(name) else {
                return node;
            };
            for index in candidates {
                if let Some(found) = index.match_condition(kind, side, operand) {
                    return build_plan(index, found);
                }
            }
            node
        })
    }
}

/// `Condition` has no notion of which side is "the attribute" baked in; this
/// is the one place that looks at a `BinOp`'s shape to decide.
fn extract_attribute(condition: &Condition) -> Option<(&str, BinOpKind, AttrSide, &Condition)> {
    let Condition::BinOp { kind, left, right } = condition else {
        return None;
    };
    match (left.as_attribute(), right.as_attribute()) {
        (Some(name), None) => Some((name, *kind, AttrSide::Left, right.as_ref())),
        (None, Some(name)) => Some((name, *kind, AttrSide::Right, left.as_ref())),
        _ => None,
    }
}

fn build_plan<T>(index: &Rc<dyn Index<T>>, found: IndexMatch) -> Plan<T> {
    match found {
        IndexMatch::Lookup(value) => Plan::IndexLookup {
            index: Rc::clone(index),
            value,
        },
        IndexMatch::Range(range) => Plan::IndexRange {
            index: Rc::clone(index),
            range,
        },
        IndexMatch::UnionOfLookups(values) => Plan::Union(
            values
                .into_iter()
                .map(|value| Plan::IndexLookup {
                    index: Rc::clone(index),
                    value,
                })
                .collect(),
        ),
    }
}
