//! Grounded on odex's `CombineFilters` (`odex/optimize.py`): fold `ScanFilter`
//! siblings under an `Intersect` into a single `AND`-ed `ScanFilter`, or, if
//! other kinds of plan sit alongside them, into one `Filter` wrapping
//! whatever base those other plans reduce to.

use crate::condition::and_;
use crate::index::IndexRegistry;
use crate::optimizer::Rule;
use crate::plan::Plan;

pub struct CombineFilters;

impl<T> Rule<T> for CombineFilters {
    fn name(&self) -> &'static str {
        "CombineFilters"
    }

    fn apply(&self, plan: Plan<T>, _indexes: &IndexRegistry<T>) -> Plan<T> {
        plan.transform(&mut |node| match node {
            Plan::Intersect(inputs) => combine(inputs),
            other => other,
        })
    }
}

fn combine<T>(inputs: Vec<Plan<T>>) -> Plan<T> {
    let scan_count = inputs
        .iter()
        .filter(|p| matches!(p, Plan::ScanFilter(_)))
        .count();
    if scan_count < 2 {
        return Plan::Intersect(inputs);
    }

    let mut conditions = Vec::new();
    let mut others = Vec::new();
    for input in inputs {
        match input {
            Plan::ScanFilter(condition) => conditions.push(condition),
            other => others.push(other),
        }
    }
    let folded = and_(conditions);

    if others.is_empty() {
        return Plan::ScanFilter(folded);
    }
    let base = if others.len() == 1 {
        others.into_iter().next().expect("checked len == 1")
    } else {
        Plan::Intersect(others)
    };
    Plan::Filter {
        condition: folded,
        input: Box::new(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::attr;
    use std::collections::HashMap;

    #[test]
    fn scan_filter_siblings_fold_into_one_anded_scan_filter() {
        let plan: Plan<()> = Plan::Intersect(vec![
            Plan::ScanFilter(attr("a").eq(1)),
            Plan::ScanFilter(attr("b").eq(2)),
        ]);
        let indexes: IndexRegistry<()> = HashMap::new();
        let rewritten = CombineFilters.apply(plan, &indexes);
        match rewritten {
            Plan::ScanFilter(condition) => assert_eq!(condition.to_string(), "a = 1 AND b = 2"),
            _ => panic!("expected a single ScanFilter"),
        }
    }

    #[test]
    fn scan_filters_alongside_an_index_lookup_wrap_it_in_a_filter() {
        use crate::index::HashIndex;
        use crate::value::Value;
        use std::rc::Rc;

        let index: Rc<dyn crate::index::Index<i64>> = Rc::new(HashIndex::new("id"));
        let plan: Plan<i64> = Plan::Intersect(vec![
            Plan::IndexLookup {
                index,
                value: Value::Int(1),
            },
            Plan::ScanFilter(attr("a").eq(1)),
            Plan::ScanFilter(attr("b").eq(2)),
        ]);
        let indexes: IndexRegistry<i64> = HashMap::new();
        let rewritten = CombineFilters.apply(plan, &indexes);
        match rewritten {
            Plan::Filter { condition, input } => {
                assert_eq!(condition.to_string(), "a = 1 AND b = 2");
                assert!(matches!(*input, Plan::IndexLookup { .. }));
            }
            _ => panic!("expected Filter"),
        }
    }

    #[test]
    fn a_single_scan_filter_is_left_alone() {
        let plan: Plan<()> = Plan::Intersect(vec![
            Plan::ScanFilter(attr("a").eq(1)),
            Plan::Empty,
        ]);
        let indexes: IndexRegistry<()> = HashMap::new();
        let rewritten = CombineFilters.apply(plan, &indexes);
        assert!(matches!(rewritten, Plan::Intersect(inputs) if inputs.len() == 2));
    }
}
