//! Filter model for map searches.
//!
//! A [`MapSearchFilters`] value is built once per request from already-typed
//! query parameters, is immutable afterwards, and is consumed synchronously
//! by the query builder. Every field is optional or defaulted; `None` on a
//! tri-state field means "no constraint", never `false`.

use serde::Deserialize;

use crate::models::{Difficulty, PlaytestStatus};

/// Medal presence filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum MedalFilter {
    #[default]
    All,
    With,
    Without,
}

/// Completion presence filter, relative to the requesting user. Inert
/// without a `user_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CompletionFilter {
    #[default]
    All,
    With,
    Without,
}

/// Playtest presence filter: `Only` keeps maps with an open playtest thread,
/// `None` keeps maps without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PlaytestFilter {
    #[default]
    All,
    Only,
    None,
}

/// Filter set for building map search queries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapSearchFilters {
    pub playtesting: Option<PlaytestStatus>,
    pub archived: Option<bool>,
    pub hidden: Option<bool>,
    pub official: Option<bool>,
    pub playtest_thread_id: Option<i64>,
    pub code: Option<String>,
    /// Single-column membership (OR within the field).
    pub category: Option<Vec<String>>,
    /// Single-column membership (OR within the field).
    pub map_name: Option<Vec<String>>,
    /// `"field:direction"` tokens, applied in order.
    pub sort: Option<Vec<String>>,
    /// Mutually exclusive with `creator_names`.
    pub creator_ids: Option<Vec<i64>>,
    /// Case-insensitive substring matches; mutually exclusive with
    /// `creator_ids`.
    pub creator_names: Option<Vec<String>>,
    /// AND-of-memberships: a map must carry every listed mechanic.
    pub mechanics: Option<Vec<String>>,
    /// AND-of-memberships.
    pub restrictions: Option<Vec<String>>,
    /// AND-of-memberships.
    pub tags: Option<Vec<String>>,
    /// Mutually exclusive with the range bounds.
    pub difficulty_exact: Option<Difficulty>,
    pub difficulty_range_min: Option<Difficulty>,
    pub difficulty_range_max: Option<Difficulty>,
    /// Keep only playtests whose voting concluded but whose status has not
    /// yet left `In Progress`.
    pub finalized_playtests: Option<bool>,
    /// Threshold on the verified average quality rating.
    pub minimum_quality: Option<i32>,
    pub user_id: Option<i64>,
    pub medal_filter: MedalFilter,
    pub completion_filter: CompletionFilter,
    pub playtest_filter: PlaytestFilter,
    /// Disables pagination entirely.
    pub return_all: bool,
    /// When set, a `code` filter combines with the other filters instead of
    /// short-circuiting them.
    pub force_filters: bool,
    pub page_size: u32,
    /// 1-indexed.
    pub page_number: u32,
}

impl Default for MapSearchFilters {
    fn default() -> Self {
        Self {
            playtesting: None,
            archived: None,
            hidden: None,
            official: None,
            playtest_thread_id: None,
            code: None,
            category: None,
            map_name: None,
            sort: None,
            creator_ids: None,
            creator_names: None,
            mechanics: None,
            restrictions: None,
            tags: None,
            difficulty_exact: None,
            difficulty_range_min: None,
            difficulty_range_max: None,
            finalized_playtests: None,
            minimum_quality: None,
            user_id: None,
            medal_filter: MedalFilter::All,
            completion_filter: CompletionFilter::All,
            playtest_filter: PlaytestFilter::All,
            return_all: false,
            force_filters: false,
            page_size: 10,
            page_number: 1,
        }
    }
}

impl MapSearchFilters {
    /// A direct code lookup bypasses the candidate-set machinery unless the
    /// caller explicitly forces the other filters to apply.
    pub fn code_short_circuit(&self) -> bool {
        self.code.is_some() && !self.force_filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_an_unfiltered_first_page() {
        let filters = MapSearchFilters::default();
        assert_eq!(filters.page_size, 10);
        assert_eq!(filters.page_number, 1);
        assert_eq!(filters.medal_filter, MedalFilter::All);
        assert_eq!(filters.completion_filter, CompletionFilter::All);
        assert_eq!(filters.playtest_filter, PlaytestFilter::All);
        assert!(!filters.return_all);
        assert!(!filters.force_filters);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let filters: MapSearchFilters = serde_json::from_str(
            r#"{
                "mechanics": ["Bhop", "Dash"],
                "difficulty_range_min": "Medium",
                "medal_filter": "Without",
                "page_size": 25,
                "page_number": 3
            }"#,
        )
        .unwrap();
        assert_eq!(filters.mechanics.as_deref().unwrap().len(), 2);
        assert_eq!(filters.difficulty_range_min, Some(Difficulty::Medium));
        assert_eq!(filters.medal_filter, MedalFilter::Without);
        assert_eq!(filters.page_size, 25);
        assert_eq!(filters.page_number, 3);
        assert!(filters.code.is_none());
    }

    #[test]
    fn code_short_circuit_requires_unforced_code() {
        let mut filters = MapSearchFilters {
            code: Some("ABC12".to_string()),
            ..Default::default()
        };
        assert!(filters.code_short_circuit());

        filters.force_filters = true;
        assert!(!filters.code_short_circuit());

        filters.code = None;
        assert!(!filters.code_short_circuit());
    }
}
