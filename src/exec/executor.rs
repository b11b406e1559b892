//! Plan evaluation (component G).
//!
//! Grounded on odex's `IndexedSet.execute` (`odex/set.py`) for the dispatch
//! shape and on `odex/utils.py`'s `intersect` (sort operands ascending by
//! size before folding) for the `Intersect` strategy. Dispatch is a plain
//! exhaustive `match` rather than the Python original's dict of lambdas,
//! following the style helium's optimizer rules use to walk `LogicalPlan`
//! (`src/optimizer/rules/constant_fold.rs`).

use super::matcher;
use crate::error::Error;
use crate::plan::Plan;
use std::collections::HashSet;
use std::hash::Hash;

/// Looks up an object's value for a named attribute. Implemented by
/// `IndexedSet` over its `attrs` map.
pub trait Getter<T> {
    fn get(&self, obj: &T, attribute: &str) -> crate::value::Value;
}

pub fn execute<T>(plan: &Plan<T>, objects: &[T], getter: &dyn Getter<T>) -> Result<Vec<T>, Error>
where
    T: Clone + Eq + Hash,
{
    match plan {
        Plan::Empty => Ok(Vec::new()),
        Plan::ScanFilter(condition) => Ok(objects
            .iter()
            .filter(|obj| matcher::eval(condition, obj, getter).is_truthy())
            .cloned()
            .collect()),
        Plan::Filter { condition, input } => Ok(execute(input, objects, getter)?
            .into_iter()
            .filter(|obj| matcher::eval(condition, obj, getter).is_truthy())
            .collect()),
        Plan::Intersect(inputs) => intersect(inputs, objects, getter),
        Plan::Union(inputs) => union(inputs, objects, getter),
        Plan::IndexLookup { index, value } => Ok(index.lookup(value)),
        Plan::IndexRange { index, range } => index.range(range),
    }
}

/// Evaluate every operand, then fold smallest-set-first (odex's
/// `utils.intersect`): intersecting into the smallest result first keeps
/// every subsequent `HashSet` lookup cheap.
fn intersect<T>(inputs: &[Plan<T>], objects: &[T], getter: &dyn Getter<T>) -> Result<Vec<T>, Error>
where
    T: Clone + Eq + Hash,
{
    let mut sets: Vec<Vec<T>> = inputs
        .iter()
        .map(|p| execute(p, objects, getter))
        .collect::<Result<_, _>>()?;
    sets.sort_by_key(Vec::len);

    let mut iter = sets.into_iter();
    let Some(first) = iter.next() else {
        return Ok(Vec::new());
    };
    let mut acc: HashSet<T> = first.into_iter().collect();
    for set in iter {
        if acc.is_empty() {
            break;
        }
        let members: HashSet<T> = set.into_iter().collect();
        acc.retain(|o| members.contains(o));
    }
    Ok(acc.into_iter().collect())
}

fn union<T>(inputs: &[Plan<T>], objects: &[T], getter: &dyn Getter<T>) -> Result<Vec<T>, Error>
where
    T: Clone + Eq + Hash,
{
    let mut seen: HashSet<T> = HashSet::new();
    let mut result = Vec::new();
    for input in inputs {
        for obj in execute(input, objects, getter)? {
            if seen.insert(obj.clone()) {
                result.push(obj);
            }
        }
    }
    Ok(result)
}
