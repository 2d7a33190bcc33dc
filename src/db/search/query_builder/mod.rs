//! SQL query builder for map searches.
//!
//! Compiles a [`MapSearchFilters`] value into one parameterized statement:
//! - per-dimension candidate-set CTEs, combined with INTERSECT so that
//!   simultaneous filters compose with AND semantics
//! - correlated subquery SELECT columns (no row fan-out)
//! - WHERE clauses in a fixed, deterministic order
//! - sort resolution against a fixed allow-list, with a mandatory id
//!   tie-break for stable pagination
//!
//! The builder is pure and synchronous; execution happens in
//! [`super::execute`].

mod bind;
mod candidates;
mod columns;
mod sort;

use crate::db::search::filters::{MapSearchFilters, PlaytestFilter};
use crate::models::difficulty::{self, SubTier};
use crate::{Error, Result};
use bind::{push_bool, push_float, push_int, push_text, push_text_array};

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
    Int(i64),
    IntArray(Vec<i64>),
    Float(f64),
    Bool(bool),
}

/// A compiled statement and its positional bind values, consumed exactly
/// once by the execution layer. `$n` placeholders are numbered in `args`
/// order.
#[derive(Debug, Clone)]
pub struct QueryWithArgs {
    pub sql: String,
    pub args: Vec<BindValue>,
}

/// Subquery providing the latest in-progress playtest metadata per map.
/// Always LEFT JOINed: playtest-dependent columns and filters need it even
/// when no playtest filter is active.
const PLAYTEST_META_SUBQUERY: &str = "SELECT map_id, thread_id, initial_difficulty, verification_id, created_at, updated_at, completed, ROW_NUMBER() OVER (PARTITION BY map_id ORDER BY created_at DESC) AS rn FROM playtests.meta WHERE completed IS FALSE";

/// Query builder for map searches.
#[derive(Debug)]
pub struct MapSearchQueryBuilder {
    filters: MapSearchFilters,
}

impl MapSearchQueryBuilder {
    /// Validates the filter set; mutually exclusive combinations and
    /// malformed sort requests fail here, before any compilation work.
    pub fn new(filters: MapSearchFilters) -> Result<Self> {
        Self::validate(&filters)?;
        Ok(Self { filters })
    }

    fn validate(filters: &MapSearchFilters) -> Result<()> {
        if filters.difficulty_exact.is_some()
            && (filters.difficulty_range_min.is_some() || filters.difficulty_range_max.is_some())
        {
            return Err(Error::Validation(
                "Cannot use exact difficulty with range-based filtering".to_string(),
            ));
        }

        if filters.creator_ids.is_some() && filters.creator_names.is_some() {
            return Err(Error::Validation(
                "Cannot use creator_ids and creator_names simultaneously".to_string(),
            ));
        }

        if let Some(tokens) = filters.sort.as_deref() {
            sort::resolve_sort_tokens(tokens)?;
        }

        if filters.page_number == 0 {
            return Err(Error::Validation(
                "page_number is 1-indexed and must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Compile the statement text and its positional bind values.
    pub fn build(&self) -> Result<QueryWithArgs> {
        let mut args = Vec::new();

        let sets = candidates::build_candidate_sets(&self.filters, &mut args);
        let select_columns = columns::select_list(&self.filters, &mut args);
        let where_clauses = self.where_clauses(&mut args)?;
        let order_by = self.order_by()?;

        let mut sql = String::new();

        if !sets.is_empty() {
            let mut cte_parts: Vec<String> = sets
                .iter()
                .map(|set| format!("{} AS ({})", set.name, set.sql))
                .collect();
            cte_parts.push(format!(
                "intersection_map_ids AS ({})",
                candidates::intersection_sql(&sets)
            ));
            sql.push_str("WITH ");
            sql.push_str(&cte_parts.join(", "));
            sql.push(' ');
        }

        sql.push_str("SELECT ");
        sql.push_str(&select_columns.join(", "));

        if sets.is_empty() {
            sql.push_str(" FROM core.maps m");
        } else {
            sql.push_str(" FROM intersection_map_ids i JOIN core.maps m ON m.id = i.map_id");
        }

        sql.push_str(" LEFT JOIN (");
        sql.push_str(PLAYTEST_META_SUBQUERY);
        sql.push_str(") pm ON pm.map_id = m.id AND pm.rn = 1");

        if !where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clauses.join(" AND "));
        }

        sql.push_str(" ORDER BY ");
        sql.push_str(&order_by.join(", "));

        if !self.filters.return_all {
            let page_number = i64::from(self.filters.page_number.max(1));
            let page_size = i64::from(self.filters.page_size);
            let offset = (page_number - 1) * page_size;
            sql.push_str(&format!(" LIMIT {page_size} OFFSET {offset}"));
        }

        tracing::debug!(
            candidate_sets = sets.len(),
            bind_count = args.len(),
            "compiled map search statement"
        );

        Ok(QueryWithArgs { sql, args })
    }

    /// WHERE clauses in a stable, predictable order. The order carries no
    /// semantics but keeps the emitted text deterministic.
    fn where_clauses(&self, args: &mut Vec<BindValue>) -> Result<Vec<String>> {
        let filters = &self.filters;
        let mut clauses = Vec::new();

        if let Some(code) = &filters.code {
            let code_idx = push_text(args, code.clone());
            clauses.push(format!("m.code = ${code_idx}"));
        }

        if let Some(status) = filters.playtesting {
            let status_idx = push_text(args, status.as_str().to_string());
            clauses.push(format!("m.playtesting::text = ${status_idx}"));
        }

        match filters.playtest_filter {
            PlaytestFilter::None => clauses.push("pm.thread_id IS NULL".to_string()),
            PlaytestFilter::Only => clauses.push("pm.thread_id IS NOT NULL".to_string()),
            PlaytestFilter::All => {}
        }

        if filters.difficulty_range_min.is_some() || filters.difficulty_range_max.is_some() {
            let (lo, hi) = difficulty::range_bounds(
                filters.difficulty_range_min,
                filters.difficulty_range_max,
            );
            let lo_idx = push_float(args, lo);
            let hi_idx = push_float(args, hi);
            clauses.push(format!("m.raw_difficulty BETWEEN ${lo_idx} AND ${hi_idx}"));
        }

        if let Some(exact) = filters.difficulty_exact {
            if exact.is_top() {
                // The top tier has no sub-tier variants; it is matched by
                // label, not by a numeric range.
                clauses.push(format!("m.difficulty = '{}'", exact.as_str()));
            } else {
                let (lo, _) = exact.sub_tier_bounds(SubTier::Lower).ok_or_else(|| {
                    Error::Internal(format!("missing lower sub-tier for {}", exact.as_str()))
                })?;
                let (_, hi) = exact.sub_tier_bounds(SubTier::Upper).ok_or_else(|| {
                    Error::Internal(format!("missing upper sub-tier for {}", exact.as_str()))
                })?;
                let lo_idx = push_float(args, lo);
                let hi_idx = push_float(args, hi);
                clauses.push(format!(
                    "m.raw_difficulty >= ${lo_idx} AND m.raw_difficulty < ${hi_idx}"
                ));
            }
        }

        if let Some(archived) = filters.archived {
            let archived_idx = push_bool(args, archived);
            clauses.push(format!("m.archived = ${archived_idx}"));
        }

        if let Some(hidden) = filters.hidden {
            let hidden_idx = push_bool(args, hidden);
            clauses.push(format!("m.hidden = ${hidden_idx}"));
        }

        if let Some(official) = filters.official {
            let official_idx = push_bool(args, official);
            clauses.push(format!("m.official = ${official_idx}"));
        }

        if let Some(map_names) = filters.map_name.as_ref().filter(|names| !names.is_empty()) {
            let names_idx = push_text_array(args, map_names.clone());
            clauses.push(format!("m.map_name = ANY(${names_idx})"));
        }

        if let Some(categories) = filters
            .category
            .as_ref()
            .filter(|categories| !categories.is_empty())
        {
            let categories_idx = push_text_array(args, categories.clone());
            clauses.push(format!("m.category = ANY(${categories_idx})"));
        }

        if let Some(thread_id) = filters.playtest_thread_id {
            let thread_idx = push_int(args, thread_id);
            clauses.push(format!("pm.thread_id = ${thread_idx}"));
        }

        // Voting concluded (verification assigned) but the map has not yet
        // left the in-progress state.
        if filters.finalized_playtests == Some(true) {
            clauses.push(
                "pm.verification_id IS NOT NULL AND m.playtesting = 'In Progress'".to_string(),
            );
        }

        Ok(clauses)
    }

    /// ORDER BY clauses. A final `m.id ASC` tie-break is always appended so
    /// pagination stays stable across requests.
    fn order_by(&self) -> Result<Vec<String>> {
        let Some(tokens) = self.filters.sort.as_ref().filter(|tokens| !tokens.is_empty()) else {
            return Ok(vec!["m.raw_difficulty".to_string(), "m.id ASC".to_string()]);
        };

        let resolved = sort::resolve_sort_tokens(tokens)?;
        let mut order_by: Vec<String> = resolved
            .iter()
            .map(|sort| {
                let direction = if sort.ascending { "ASC" } else { "DESC" };
                format!("{} {} NULLS FIRST", sort.column, direction)
            })
            .collect();
        order_by.push("m.id ASC".to_string());
        Ok(order_by)
    }
}
