//! SELECT column list for map searches.
//!
//! One-to-many relations (creators, guides, mechanics, votes, ...) are
//! fetched through correlated scalar/aggregate subqueries rather than joins,
//! so a result row never fans out.

use super::bind::push_int;
use super::BindValue;
use crate::db::search::filters::MapSearchFilters;

/// Average quality rating across all ratings for the map.
const RATINGS: &str =
    "(SELECT avg(quality)::float FROM maps.ratings r WHERE r.map_id = m.id) AS ratings";

/// Playtest metadata blob, present only while the map is in progress with an
/// open thread.
const PLAYTEST_JSON: &str = "CASE WHEN m.playtesting::text = 'In Progress' AND pm.thread_id IS NOT NULL THEN jsonb_build_object(\
'thread_id', pm.thread_id, \
'initial_difficulty', pm.initial_difficulty, \
'verification_id', pm.verification_id, \
'completed', pm.completed, \
'vote_average', (SELECT avg(difficulty)::float FROM playtests.votes v WHERE v.map_id = m.id), \
'vote_count', (SELECT count(*) FROM playtests.votes v WHERE v.map_id = m.id), \
'voters', (SELECT array_agg(DISTINCT v.user_id) FROM playtests.votes v WHERE v.map_id = m.id)\
) END AS playtest";

/// Creator list with the display name resolved at query time: Overwatch
/// username > nickname > global name > fallback literal.
const CREATORS_JSON: &str = "COALESCE((SELECT jsonb_agg(DISTINCT jsonb_build_object(\
'id', c.user_id, \
'is_primary', c.is_primary, \
'name', coalesce(ow.username, u.nickname, u.global_name, 'Unknown Username')\
)) FROM maps.creators c \
JOIN core.users u ON c.user_id = u.id \
LEFT JOIN users.overwatch_usernames ow ON c.user_id = ow.user_id AND ow.is_primary \
WHERE c.map_id = m.id), '[]'::jsonb) AS creators";

const GUIDES_ARRAY: &str =
    "(SELECT array_agg(DISTINCT g.url) FROM maps.guides g WHERE g.map_id = m.id) AS guides";

const MEDALS_JSON: &str = "(SELECT jsonb_build_object('gold', med.gold, 'silver', med.silver, 'bronze', med.bronze) FROM maps.medals med WHERE med.map_id = m.id) AS medals";

const MECHANICS_ARRAY: &str = "COALESCE((SELECT array_agg(DISTINCT mech.name) FROM maps.mechanic_links ml JOIN maps.mechanics mech ON mech.id = ml.mechanic_id WHERE ml.map_id = m.id), ARRAY[]::text[]) AS mechanics";

const RESTRICTIONS_ARRAY: &str = "COALESCE((SELECT array_agg(DISTINCT res.name) FROM maps.restriction_links rl JOIN maps.restrictions res ON res.id = rl.restriction_id WHERE rl.map_id = m.id), ARRAY[]::text[]) AS restrictions";

const TAGS_ARRAY: &str = "COALESCE((SELECT array_agg(DISTINCT tag.name) FROM maps.tag_links tl JOIN maps.tags tag ON tag.id = tl.tag_id WHERE tl.map_id = m.id), ARRAY[]::text[]) AS tags";

/// Build the full SELECT list. Order matches [`MapSearchResult`] field by
/// field.
///
/// [`MapSearchResult`]: crate::models::MapSearchResult
pub(super) fn select_list(
    filters: &MapSearchFilters,
    bind_params: &mut Vec<BindValue>,
) -> Vec<String> {
    vec![
        "m.id".to_string(),
        "m.code".to_string(),
        "m.map_name".to_string(),
        "m.category".to_string(),
        "m.checkpoints".to_string(),
        "m.official".to_string(),
        "m.playtesting".to_string(),
        "m.archived".to_string(),
        "m.hidden".to_string(),
        "m.created_at".to_string(),
        "m.updated_at".to_string(),
        "pm.thread_id".to_string(),
        user_completion_time(filters, bind_params),
        RATINGS.to_string(),
        PLAYTEST_JSON.to_string(),
        CREATORS_JSON.to_string(),
        GUIDES_ARRAY.to_string(),
        MEDALS_JSON.to_string(),
        MECHANICS_ARRAY.to_string(),
        RESTRICTIONS_ARRAY.to_string(),
        TAGS_ARRAY.to_string(),
        "m.description".to_string(),
        "m.raw_difficulty".to_string(),
        "m.difficulty".to_string(),
        "m.title".to_string(),
        "m.linked_code".to_string(),
        "m.custom_banner AS map_banner".to_string(),
        "COUNT(*) OVER() AS total_results".to_string(),
    ]
}

/// Latest verified non-legacy completion time for the requesting user, or a
/// literal NULL when no user context was supplied.
fn user_completion_time(filters: &MapSearchFilters, bind_params: &mut Vec<BindValue>) -> String {
    let Some(user_id) = filters.user_id else {
        return "NULL AS time".to_string();
    };
    let user_idx = push_int(bind_params, user_id);
    format!(
        "(SELECT c.time FROM core.completions c WHERE c.map_id = m.id AND c.user_id = ${user_idx} AND c.verified AND c.legacy = FALSE ORDER BY c.inserted_at DESC LIMIT 1) AS time"
    )
}
