//! Physical operator tree (component B).
//!
//! Grounded on helium's `ir::plan::LogicalPlan` (the tree shape and the
//! recursive per-variant rewrite style used by `optimizer::rules::*`) and on
//! odex's `plan.Plan` hierarchy (the `transform` post-order rewrite
//! primitive and the exact `to_s` string forms the golden tests assert).

pub mod range;

pub use range::{Bound, Range};

use crate::condition::Condition;
use crate::index::Index;
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub enum Plan<T> {
    /// Produces the empty set.
    Empty,
    /// Linear scan of the collection, filtering with `condition`.
    ScanFilter(Condition),
    /// Apply `condition` to the result of `input`.
    Filter {
        condition: Condition,
        input: Box<Plan<T>>,
    },
    /// Set intersection of `inputs` (at least 2 once reaching the executor).
    Intersect(Vec<Plan<T>>),
    /// Set union of `inputs` (at least 2 once reaching the executor).
    Union(Vec<Plan<T>>),
    /// `index.lookup(value)`.
    IndexLookup {
        index: Rc<dyn Index<T>>,
        value: crate::value::Value,
    },
    /// `index.range(range)`.
    IndexRange {
        index: Rc<dyn Index<T>>,
        range: Range<crate::value::Value>,
    },
}

impl<T> Plan<T> {
    /// Recursively transform children in place (post-order), then apply `f`
    /// to the resulting node. This is the single rewriting primitive every
    /// `CombineRanges` optimizer rule is built on.
    #[must_use]
    pub fn transform<F>(self, f: &mut F) -> Plan<T>
    where
        F: FnMut(Plan<T>) -> Plan<T>,
    {
        let rewritten_children = match self {
            Plan::Filter { condition, input } => Plan::Filter {
                condition,
                input: Box::new(input.transform(f)),
            },
            Plan::Intersect(inputs) => {
                Plan::Intersect(inputs.into_iter().map(|p| p.transform(f)).collect())
            }
            Plan::Union(inputs) => {
                Plan::Union(inputs.into_iter().map(|p| p.transform(f)).collect())
            }
            leaf => leaf,
        };
        f(rewritten_children)
    }

    fn to_s(&self, depth: usize) -> String {
        match self {
            Plan::Empty => "Empty".to_string(),
            Plan::ScanFilter(condition) => format!("ScanFilter: {condition}"),
            Plan::Filter { condition, input } => {
                let indent = "  ".repeat(depth);
                format!(
                    "Filter: {condition}\n{indent}  - {}",
                    input.to_s(depth + 1)
                )
            }
            Plan::Intersect(inputs) => Self::set_op_to_s("Intersect", inputs, depth),
            Plan::Union(inputs) => Self::set_op_to_s("Union", inputs, depth),
            Plan::IndexLookup { index, value } => {
                format!("IndexLookup: {} = {value}", index.describe())
            }
            Plan::IndexRange { index, range } => Self::index_range_to_s(index.as_ref(), range),
        }
    }

    fn set_op_to_s(name: &str, inputs: &[Plan<T>], depth: usize) -> String {
        let indent = "  ".repeat(depth);
        let lines: Vec<String> = inputs
            .iter()
            .map(|i| format!("{indent}  - {}", i.to_s(depth + 1)))
            .collect();
        format!("{name}\n{}", lines.join("\n"))
    }

    fn index_range_to_s(index: &dyn Index<T>, range: &Range<crate::value::Value>) -> String {
        let left_symbol = |inclusive: bool| if inclusive { "<=" } else { "<" };
        match (&range.left, &range.right) {
            (Bound::Unset, Bound::Value(right, right_inc)) => {
                format!(
                    "IndexRange: {} {} {right}",
                    index.describe(),
                    left_symbol(*right_inc)
                )
            }
            (Bound::Value(left, left_inc), Bound::Unset) => {
                format!(
                    "IndexRange: {left} {} {}",
                    left_symbol(*left_inc),
                    index.describe()
                )
            }
            (Bound::Value(left, left_inc), Bound::Value(right, right_inc)) => {
                format!(
                    "IndexRange: {left} {} {} {} {right}",
                    left_symbol(*left_inc),
                    index.describe(),
                    left_symbol(*right_inc)
                )
            }
            (Bound::Unset, Bound::Unset) => format!("IndexRange: {}", index.describe()),
        }
    }
}

impl<T> fmt::Display for Plan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_s(0))
    }
}

impl<T> fmt::Debug for Plan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_s(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{attr, literal};

    #[test]
    fn scan_filter_pretty_prints_condition() {
        let plan: Plan<()> = Plan::ScanFilter(attr("a").eq(2));
        assert_eq!(plan.to_string(), "ScanFilter: a = 2");
    }

    #[test]
    fn empty_plan_pretty_prints() {
        let plan: Plan<()> = Plan::Empty;
        assert_eq!(plan.to_string(), "Empty");
    }

    #[test]
    fn pretty_print_is_deterministic() {
        let plan: Plan<()> = Plan::Intersect(vec![
            Plan::ScanFilter(attr("a").eq(2)),
            Plan::ScanFilter(attr("b").gt(0)),
        ]);
        assert_eq!(plan.to_string(), plan.to_string());
        let _ = literal(1);
    }

    #[test]
    fn transform_rewrites_leaves_bottom_up() {
        let plan: Plan<()> = Plan::Intersect(vec![
            Plan::ScanFilter(attr("a").eq(2)),
            Plan::ScanFilter(attr("b").eq(3)),
        ]);

        let rewritten = plan.transform(&mut |p| match p {
            Plan::ScanFilter(_) => Plan::Empty,
            other => other,
        });

        match rewritten {
            Plan::Intersect(inputs) => {
                assert!(inputs.iter().all(|p| matches!(p, Plan::Empty)));
            }
            _ => panic!("expected Intersect"),
        }
    }
}
