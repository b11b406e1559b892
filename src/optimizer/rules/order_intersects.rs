//! Supplemented from the original Python implementation's `OrderIntersects`
//! rule (present in `odex/optimize.py`'s `DEFAULT_RULES` but dropped from the
//! distilled rule list): reorder `Intersect` inputs so the cheapest branch
//! is probed first, since the executor's fold (component G) narrows on the
//! first operand.

use crate::index::IndexRegistry;
use crate::optimizer::Rule;
use crate::plan::Plan;

pub struct OrderIntersects;

impl<T> Rule<T> for OrderIntersects {
    fn name(&self) -> &'static str {
        "OrderIntersects"
    }

    fn apply(&self, plan: Plan<T>, _indexes: &IndexRegistry<T>) -> Plan<T> {
        plan.transform(&mut |node| match node {
            Plan::Intersect(mut inputs) => {
                inputs.sort_by_key(estimate_cost);
                Plan::Intersect(inputs)
            }
            other => other,
        })
    }
}

/// A rough, index-kind-based cost estimate; not calibrated against any real
/// object count, only used to order siblings relative to each other.
fn estimate_cost<T>(plan: &Plan<T>) -> u32 {
    match plan {
        Plan::Empty => 0,
        Plan::IndexLookup { .. } => 1,
        Plan::IndexRange { .. } => 10,
        Plan::Union(inputs) => inputs.iter().map(estimate_cost).sum(),
        Plan::Intersect(inputs) => inputs.iter().map(estimate_cost).min().unwrap_or(0),
        Plan::Filter { input, .. } => estimate_cost(input),
        Plan::ScanFilter(_) => 1_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::attr;
    use crate::index::HashIndex;
    use crate::value::Value;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[test]
    fn cheapest_branch_is_moved_first() {
        let index: Rc<dyn crate::index::Index<i64>> = Rc::new(HashIndex::new("a"));
        let plan: Plan<i64> = Plan::Intersect(vec![
            Plan::ScanFilter(attr("b").eq(2)),
            Plan::IndexLookup {
                index,
                value: Value::Int(1),
            },
        ]);
        let indexes: IndexRegistry<i64> = HashMap::new();
        let rewritten = OrderIntersects.apply(plan, &indexes);
        match rewritten {
            Plan::Intersect(inputs) => assert!(matches!(inputs[0], Plan::IndexLookup { .. })),
            _ => panic!("expected Intersect"),
        }
    }
}
