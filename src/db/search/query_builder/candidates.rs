//! Per-dimension candidate-set builders.
//!
//! Each active filter dimension compiles to an independent named CTE
//! selecting the map ids that satisfy that one dimension. The builder
//! intersects all of them afterwards, which is what gives the multi-valued
//! filters AND semantics without stacking self-joins: N requested mechanics
//! produce N sets, and a map must appear in every one.

use super::bind::{push_int, push_int_array, push_text};
use super::BindValue;
use crate::db::search::filters::{CompletionFilter, MapSearchFilters, MedalFilter};

/// A named candidate set: `name` is the CTE alias, `sql` its body. Every
/// body selects a single `map_id` column.
#[derive(Debug, Clone)]
pub(super) struct CandidateSet {
    pub name: String,
    pub sql: String,
}

/// Build the ordered list of candidate sets for the active filters. Empty
/// when the code short-circuit applies.
pub(super) fn build_candidate_sets(
    filters: &MapSearchFilters,
    bind_params: &mut Vec<BindValue>,
) -> Vec<CandidateSet> {
    if filters.code_short_circuit() {
        return Vec::new();
    }

    let mut sets = Vec::new();

    sets.extend(value_match_sets(
        "mechanic_match",
        "maps.mechanic_links",
        "mechanic_id",
        "maps.mechanics",
        filters.mechanics.as_deref(),
        bind_params,
    ));
    sets.extend(value_match_sets(
        "restriction_match",
        "maps.restriction_links",
        "restriction_id",
        "maps.restrictions",
        filters.restrictions.as_deref(),
        bind_params,
    ));
    sets.extend(value_match_sets(
        "tag_match",
        "maps.tag_links",
        "tag_id",
        "maps.tags",
        filters.tags.as_deref(),
        bind_params,
    ));

    if let Some(set) = creator_ids_set(filters, bind_params) {
        sets.push(set);
    }
    sets.extend(creator_name_sets(filters, bind_params));

    if let Some(set) = minimum_quality_set(filters, bind_params) {
        sets.push(set);
    }
    if let Some(set) = medal_set(filters) {
        sets.push(set);
    }
    if let Some(set) = completion_set(filters, bind_params) {
        sets.push(set);
    }

    sets
}

/// One set per requested value against a link table + lookup table pair.
/// Shared by mechanics, restrictions, and tags.
fn value_match_sets(
    prefix: &str,
    link_table: &str,
    link_column: &str,
    lookup_table: &str,
    values: Option<&[String]>,
    bind_params: &mut Vec<BindValue>,
) -> Vec<CandidateSet> {
    let Some(values) = values else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let value_idx = push_text(bind_params, value.clone());
            CandidateSet {
                name: format!("{prefix}_{idx}"),
                sql: format!(
                    "SELECT l.map_id FROM {link_table} l JOIN {lookup_table} v ON l.{link_column} = v.id WHERE v.name = ${value_idx}"
                ),
            }
        })
        .collect()
}

/// OR within this one dimension: a single set covering all requested ids.
fn creator_ids_set(
    filters: &MapSearchFilters,
    bind_params: &mut Vec<BindValue>,
) -> Option<CandidateSet> {
    let ids = filters.creator_ids.as_ref().filter(|ids| !ids.is_empty())?;
    let ids_idx = push_int_array(bind_params, ids.clone());
    Some(CandidateSet {
        name: "limited_creator_ids".to_string(),
        sql: format!("SELECT c.map_id FROM maps.creators c WHERE c.user_id = ANY(${ids_idx})"),
    })
}

/// One set per requested name, matched case-insensitively against any of the
/// creator's nickname, global name, or linked Overwatch username. DISTINCT
/// because the username join can fan out.
fn creator_name_sets(
    filters: &MapSearchFilters,
    bind_params: &mut Vec<BindValue>,
) -> Vec<CandidateSet> {
    let Some(names) = filters.creator_names.as_deref() else {
        return Vec::new();
    };
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let pattern_idx = push_text(bind_params, format!("%{name}%"));
            CandidateSet {
                name: format!("creator_match_{idx}"),
                sql: format!(
                    "SELECT DISTINCT c.map_id FROM maps.creators c \
                     JOIN core.users u ON c.user_id = u.id \
                     LEFT JOIN users.overwatch_usernames ow ON u.id = ow.user_id \
                     WHERE u.nickname ILIKE ${pattern_idx} OR u.global_name ILIKE ${pattern_idx} OR ow.username ILIKE ${pattern_idx}"
                ),
            }
        })
        .collect()
}

/// Maps whose verified average quality rating meets the threshold.
fn minimum_quality_set(
    filters: &MapSearchFilters,
    bind_params: &mut Vec<BindValue>,
) -> Option<CandidateSet> {
    let threshold = filters.minimum_quality?;
    let threshold_idx = push_int(bind_params, i64::from(threshold));
    Some(CandidateSet {
        name: "limited_quality".to_string(),
        sql: format!(
            "SELECT q.map_id FROM (SELECT map_id, avg(quality) AS avg_quality FROM maps.ratings WHERE verified GROUP BY map_id) q WHERE q.avg_quality >= ${threshold_idx}"
        ),
    })
}

/// `Without` is a negated-existence check, not a LEFT JOIN/NULL filter, so
/// it stays correct when intersected with the other sets.
fn medal_set(filters: &MapSearchFilters) -> Option<CandidateSet> {
    match filters.medal_filter {
        MedalFilter::With => Some(CandidateSet {
            name: "limited_medals".to_string(),
            sql: "SELECT map_id FROM maps.medals".to_string(),
        }),
        MedalFilter::Without => Some(CandidateSet {
            name: "limited_medals".to_string(),
            sql: "SELECT m.id AS map_id FROM core.maps m WHERE NOT EXISTS (SELECT 1 FROM maps.medals med WHERE med.map_id = m.id)"
                .to_string(),
        }),
        MedalFilter::All => None,
    }
}

/// Completion presence for the requesting user; inert without a user id.
/// Only verified, non-legacy completions count.
fn completion_set(
    filters: &MapSearchFilters,
    bind_params: &mut Vec<BindValue>,
) -> Option<CandidateSet> {
    let user_id = filters.user_id?;
    match filters.completion_filter {
        CompletionFilter::With => {
            let user_idx = push_int(bind_params, user_id);
            Some(CandidateSet {
                name: "limited_user_completion".to_string(),
                sql: format!(
                    "SELECT map_id FROM core.completions WHERE user_id = ${user_idx} AND verified AND legacy = FALSE GROUP BY map_id"
                ),
            })
        }
        CompletionFilter::Without => {
            let user_idx = push_int(bind_params, user_id);
            Some(CandidateSet {
                name: "limited_user_completion".to_string(),
                sql: format!(
                    "SELECT m.id AS map_id FROM core.maps m WHERE NOT EXISTS (SELECT 1 FROM core.completions c WHERE c.map_id = m.id AND c.user_id = ${user_idx} AND c.verified AND c.legacy = FALSE)"
                ),
            })
        }
        CompletionFilter::All => None,
    }
}

/// AND-combination of all candidate sets via set intersection.
pub(super) fn intersection_sql(sets: &[CandidateSet]) -> String {
    sets.iter()
        .map(|set| format!("SELECT map_id FROM {}", set.name))
        .collect::<Vec<_>>()
        .join(" INTERSECT ")
}
