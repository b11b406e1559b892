//! Grounded on odex's `MergeSetOps` (`odex/optimize.py`): inline a `SetOp`
//! child into its parent when they are the same kind, so `(a AND b) AND c`
//! becomes one 3-way `Intersect` instead of a nested 2-way tree.

use crate::index::IndexRegistry;
use crate::optimizer::Rule;
use crate::plan::Plan;

pub struct MergeSetOps;

impl<T> Rule<T> for MergeSetOps {
    fn name(&self) -> &'static str {
        "MergeSetOps"
    }

    fn apply(&self, plan: Plan<T>, _indexes: &IndexRegistry<T>) -> Plan<T> {
        plan.transform(&mut |node| match node {
            Plan::Intersect(inputs) => Plan::Intersect(flatten(inputs, |p| matches!(p, Plan::Intersect(_)))),
            Plan::Union(inputs) => Plan::Union(flatten(inputs, |p| matches!(p, Plan::Union(_)))),
            other => other,
        })
    }
}

fn flatten<T>(inputs: Vec<Plan<T>>, is_same_kind: impl Fn(&Plan<T>) -> bool) -> Vec<Plan<T>> {
    let mut flattened = Vec::with_capacity(inputs.len());
    for input in inputs {
        if is_same_kind(&input) {
            match input {
                Plan::Intersect(children) | Plan::Union(children) => flattened.extend(children),
                other => flattened.push(other),
            }
        } else {
            flattened.push(input);
        }
    }
    flattened
}
