mod combine_filters;
mod combine_ranges;
mod merge_set_ops;
mod order_intersects;
mod use_index;

pub use combine_filters::CombineFilters;
pub use combine_ranges::CombineRanges;
pub use merge_set_ops::MergeSetOps;
pub use order_intersects::OrderIntersects;
pub use use_index::UseIndex;
