//! Supplements the distilled rule chain: once `UseIndex` has rewritten
//! siblings of an `Intersect` into `IndexLookup`/`IndexRange` nodes over the
//! *same* index, fold them into one tighter `IndexRange` via
//! [`crate::plan::Range::combine`] instead of executing two separate probes
//! and intersecting their results. Grounded on odex's `plan.Range.combine`
//! (`odex/plan.py`), applied here at the plan level rather than only inside
//! a single index's `match`.

use crate::index::{Index, IndexRegistry};
use crate::plan::{Bound, Plan, Range};
use crate::value::Value;
use std::rc::Rc;

pub struct CombineRanges;

impl<T> crate::optimizer::Rule<T> for CombineRanges {
    fn name(&self) -> &'static str {
        "CombineRanges"
    }

    fn apply(&self, plan: Plan<T>, _indexes: &IndexRegistry<T>) -> Plan<T> {
        plan.transform(&mut |node| match node {
            Plan::Intersect(inputs) => combine(inputs),
            other => other,
        })
    }
}

fn combine<T>(inputs: Vec<Plan<T>>) -> Plan<T> {
    let mut groups: Vec<(Rc<dyn Index<T>>, Range<Value>)> = Vec::new();
    let mut others: Vec<Plan<T>> = Vec::new();
    let mut empty = false;

    for input in inputs {
        let (index, range) = match input {
            Plan::IndexRange { index, range } => (index, range),
            Plan::IndexLookup { index, value } => (index, Range::point(value)),
            other => {
                others.push(other);
                continue;
            }
        };

        if let Some(slot) = groups.iter_mut().find(|(idx, _)| Rc::ptr_eq(idx, &index)) {
            match slot.1.combine(&range) {
                Some(combined) => slot.1 = combined,
                None => empty = true,
            }
        } else {
            groups.push((index, range));
        }
    }

    if empty {
        return Plan::Empty;
    }

    let mut rebuilt: Vec<Plan<T>> = groups
        .into_iter()
        .map(|(index, range)| match (&range.left, &range.right) {
            (Bound::Value(l, true), Bound::Value(r, true)) if l == r => Plan::IndexLookup {
                index,
                value: l.clone(),
            },
            _ => Plan::IndexRange { index, range },
        })
        .collect();
    rebuilt.extend(others);

    if rebuilt.len() == 1 {
        rebuilt.into_iter().next().expect("checked len == 1")
    } else {
        Plan::Intersect(rebuilt)
    }
}
