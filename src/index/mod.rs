//! Pluggable index abstraction (component D).
//!
//! Grounded on odex's `Index` protocol (`odex/index.py`) for the
//! add/remove/lookup/range/match shape, and on helium's
//! `storage::index::index::Index` trait (`src/storage/index/index.rs`) for
//! expressing that shape as an object-safe Rust trait usable behind
//! `Rc<dyn Index<T>>`.

pub mod hash;
pub mod inverted;
pub mod sorted;

pub use hash::HashIndex;
pub use inverted::InvertedIndex;
pub use sorted::SortedIndex;

use crate::condition::{BinOpKind, Condition};
use crate::plan::Range;
use crate::value::Value;

/// What an index offered in place of a condition it recognised. The
/// `UseIndex` rule (component F) turns this into the corresponding
/// `Plan::IndexLookup` / `IndexRange` / `Union`-of-lookups node; the index
/// itself never needs to hold a reference to its own `Rc`.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexMatch {
    Lookup(Value),
    Range(Range<Value>),
    /// `a IN (v1, v2, ..)`: one lookup per member, unioned.
    UnionOfLookups(Vec<Value>),
}

/// Which side of a `BinOp` the attribute occupied, as determined by the
/// `UseIndex` optimizer rule. The index needs this to know whether the
/// comparison must be inverted (`5 > a` is `a < 5`) and whether an `In`
/// condition is `a IN (..)` or `(..) IN a`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrSide {
    Left,
    Right,
}

/// An index over one attribute of the objects in an `IndexedSet`.
///
/// `T` is whatever identity-stable handle the set stores its objects as
/// (see [`crate::container::ByAddress`]); every index implementation keeps
/// its own map from attribute value to the set of objects holding it.
pub trait Index<T> {
    /// Attribute this index is built over.
    fn attribute(&self) -> &str;

    /// Name used by the plan pretty-printer, e.g. `"HashIndex(a)"`.
    fn describe(&self) -> String {
        format!("{}({})", self.kind_name(), self.attribute())
    }

    fn kind_name(&self) -> &'static str;

    /// Record that `value` (the attribute's value on `obj`) now maps to `obj`.
    fn add(&self, obj: T, value: &Value);

    /// Remove `obj` from the bucket for `value`.
    fn remove(&self, obj: &T, value: &Value);

    /// Objects whose attribute value equals `value`.
    fn lookup(&self, value: &Value) -> Vec<T>;

    /// Objects whose attribute value falls inside `range`. Indexes that
    /// cannot serve range queries (`HashIndex`, `InvertedIndex`) return
    /// `Error::UnsupportedIndexOperation` rather than an empty result — an
    /// empty `Vec` would read as "no matches" instead of "the optimizer
    /// built a plan this index cannot answer."
    fn range(&self, range: &Range<Value>) -> Result<Vec<T>, crate::error::Error>;

    /// Try to rewrite a condition of the form `attribute <kind> operand` (or
    /// the mirror image, per `side`) into a plan that uses this index.
    /// Returns `None` when this index cannot serve the condition.
    fn match_condition(&self, kind: BinOpKind, side: AttrSide, operand: &Condition) -> Option<IndexMatch>;
}

/// An `IndexedSet`'s index registry: attribute name to the indexes
/// registered over it, probed in registration order by `UseIndex`.
pub type IndexRegistry<T> = std::collections::HashMap<String, Vec<std::rc::Rc<dyn Index<T>>>>;
