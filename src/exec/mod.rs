//! Evaluates an optimized [`crate::plan::Plan`] against a collection
//! (component G).

pub mod executor;
pub mod matcher;

pub use executor::{execute, Getter};
pub use matcher::eval;
