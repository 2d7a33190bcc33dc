//! Result record for map searches.
//!
//! Fields correspond 1:1 to the SELECT list emitted by the query builder;
//! one-to-many relations arrive as JSON/array aggregates so a row never fans
//! out.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::map::PlaytestStatus;

/// One creator entry from the `creators` JSON array. `name` is resolved at
/// query time: Overwatch username > nickname > global name > fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapCreator {
    pub id: i64,
    pub is_primary: bool,
    pub name: String,
}

/// Medal time thresholds for a map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMedals {
    pub gold: f64,
    pub silver: f64,
    pub bronze: f64,
}

/// Metadata for the latest in-progress playtest, present only while the map
/// is in the `In Progress` state with an open playtest thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaytestDetails {
    pub thread_id: i64,
    pub initial_difficulty: Option<f64>,
    pub verification_id: Option<i64>,
    pub completed: bool,
    pub vote_average: Option<f64>,
    pub vote_count: i64,
    pub voters: Option<Vec<i64>>,
}

/// A decoded map search row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MapSearchResult {
    pub id: i64,
    pub code: String,
    pub map_name: String,
    pub category: String,
    pub checkpoints: Option<i32>,
    pub official: bool,
    pub playtesting: PlaytestStatus,
    pub archived: bool,
    pub hidden: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Open playtest thread id, if any.
    pub thread_id: Option<i64>,
    /// The requesting user's latest verified non-legacy completion time;
    /// NULL when no user context was supplied.
    pub time: Option<f64>,
    /// Average quality rating across all ratings.
    pub ratings: Option<f64>,
    pub playtest: Option<Json<PlaytestDetails>>,
    pub creators: Json<Vec<MapCreator>>,
    pub guides: Option<Vec<String>>,
    pub medals: Option<Json<MapMedals>>,
    pub mechanics: Vec<String>,
    pub restrictions: Vec<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub raw_difficulty: f64,
    /// Display label including sub-tier variants ("Hard +").
    pub difficulty: String,
    pub title: Option<String>,
    pub linked_code: Option<String>,
    pub map_banner: Option<String>,
    /// Window-function total across the whole filtered set, identical on
    /// every row of a page.
    pub total_results: i64,
}
