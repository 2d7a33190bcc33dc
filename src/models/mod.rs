//! Shared domain models: difficulty tiers, playtest state, and the map
//! search result record.

pub mod difficulty;
pub mod map;
pub mod result;

pub use difficulty::Difficulty;
pub use map::PlaytestStatus;
pub use result::{MapCreator, MapMedals, MapSearchResult, PlaytestDetails};
