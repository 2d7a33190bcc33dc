//! Map search: the filter model, the query compiler, and the execution seam.
//!
//! The compiler is pure and synchronous; only [`execute`] touches the
//! database.

pub mod execute;
pub mod filters;
pub mod query_builder;
