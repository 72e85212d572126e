//! Requirement and condition evaluation.
//!
//! - [`Expression`] - parsed `NAME`, `!NAME`, `NAME==v`, `NAME!=v` forms
//! - [`ResultIndex`] - alias index used to resolve expression names

pub mod expression;
pub mod index;

pub use expression::{Comparison, Expression};
pub use index::ResultIndex;
