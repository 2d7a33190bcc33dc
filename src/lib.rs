//! Map search core for a parkour community backend.
//!
//! Compiles an immutable [`MapSearchFilters`] value into a single
//! parameterized Postgres statement and decodes result rows:
//! - Per-dimension candidate-set CTEs with INTERSECT-based AND composition
//! - Tri-state status filters and difficulty tier resolution
//! - Deterministic sorting and offset pagination
//!
//! The HTTP layer, authentication, and plain CRUD repositories live outside
//! this crate; they construct the filter value, hand it to
//! [`MapSearchQueryBuilder`], and execute the compiled statement through
//! [`db::search::execute`].

pub mod db;
pub mod error;
pub mod models;

pub use db::search::filters::{
    CompletionFilter, MapSearchFilters, MedalFilter, PlaytestFilter,
};
pub use db::search::query_builder::{BindValue, MapSearchQueryBuilder, QueryWithArgs};
pub use error::{Error, Result};
pub use models::{Difficulty, MapSearchResult, PlaytestStatus};
