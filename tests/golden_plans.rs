//! Golden pretty-printed plan strings, matching the tree-rendering tests
//! helium keeps colocated with its own pretty-printer
//! (`src/ir/pretty.rs`) and the exact `to_s` forms odex's `plan.py`
//! produces.

use sieve::condition::attr;
use sieve::index::HashIndex;
use sieve::planner::{DefaultPlanner, Planner};
use sieve::value::Value;
use sieve::Plan;
use std::rc::Rc;

type Obj = Rc<i64>;

#[test]
fn scan_filter_renders_the_condition_inline() {
    let planner = DefaultPlanner;
    let plan: Plan<Obj> = planner.plan(&attr("a").eq(2));
    assert_eq!(plan.to_string(), "ScanFilter: a = 2");
}

#[test]
fn and_lowers_to_a_two_way_intersect_tree() {
    let planner = DefaultPlanner;
    let condition = attr("a").eq(1).and_(attr("b").gt(0));
    let plan: Plan<Obj> = planner.plan(&condition);
    assert_eq!(
        plan.to_string(),
        "Intersect\n  - ScanFilter: a = 1\n  - ScanFilter: b > 0"
    );
}

#[test]
fn or_lowers_to_a_two_way_union_tree() {
    let planner = DefaultPlanner;
    let condition = attr("a").eq(1).or_(attr("b").eq(2));
    let plan: Plan<Obj> = planner.plan(&condition);
    assert_eq!(
        plan.to_string(),
        "Union\n  - ScanFilter: a = 1\n  - ScanFilter: b = 2"
    );
}

#[test]
fn index_lookup_renders_with_the_index_name_and_value() {
    let index: Rc<dyn sieve::index::Index<Obj>> = Rc::new(HashIndex::new("id"));
    let plan: Plan<Obj> = Plan::IndexLookup {
        index,
        value: Value::Int(7),
    };
    assert_eq!(plan.to_string(), "IndexLookup: HashIndex(id) = 7");
}

#[test]
fn index_range_renders_as_a_two_sided_inequality() {
    use sieve::plan::Range;
    let index: Rc<dyn sieve::index::Index<Obj>> = Rc::new(sieve::index::SortedIndex::new("a"));
    let range = Range::at_least(Value::Int(1), false)
        .combine(&Range::at_most(Value::Int(4), true))
        .unwrap();
    let plan: Plan<Obj> = Plan::IndexRange { index, range };
    assert_eq!(plan.to_string(), "IndexRange: 1 < SortedIndex(a) <= 4");
}

#[test]
fn nested_intersect_pretty_prints_with_growing_indentation() {
    let planner = DefaultPlanner;
    let condition = attr("a")
        .eq(1)
        .and_(attr("b").eq(2))
        .or_(attr("c").eq(3));
    let plan: Plan<Obj> = planner.plan(&condition);
    assert_eq!(
        plan.to_string(),
        "Union\n  - Intersect\n    - ScanFilter: a = 1\n    - ScanFilter: b = 2\n  - ScanFilter: c = 3"
    );
}
