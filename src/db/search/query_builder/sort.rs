//! Sort token resolution.
//!
//! Sort requests arrive as `"field:direction"` tokens and are mapped through
//! a fixed allow-list of sortable columns. Unknown fields, unknown
//! directions, and malformed tokens are validation errors raised before any
//! SQL is assembled.

use crate::{Error, Result};

/// Sortable fields and the columns they map to. `ratings` refers to the
/// aggregate SELECT alias, the rest to `core.maps` columns.
const SORTABLE_COLUMNS: &[(&str, &str)] = &[
    ("difficulty", "m.raw_difficulty"),
    ("checkpoints", "m.checkpoints"),
    ("ratings", "ratings"),
    ("map_name", "m.map_name"),
    ("title", "m.title"),
    ("code", "m.code"),
];

#[derive(Debug, Clone, Copy)]
pub(super) struct ResolvedSort {
    pub column: &'static str,
    pub ascending: bool,
}

pub(super) fn resolve_sort_tokens(tokens: &[String]) -> Result<Vec<ResolvedSort>> {
    tokens
        .iter()
        .map(|token| {
            let (field, direction) = token.split_once(':').ok_or_else(|| {
                Error::Validation(format!(
                    "Invalid sort token '{token}', expected 'field:direction'"
                ))
            })?;

            let column = SORTABLE_COLUMNS
                .iter()
                .find(|(name, _)| *name == field)
                .map(|(_, column)| *column)
                .ok_or_else(|| Error::Validation(format!("Unsupported sort field: {field}")))?;

            let ascending = match direction.to_ascii_lowercase().as_str() {
                "asc" => true,
                "desc" => false,
                other => {
                    return Err(Error::Validation(format!(
                        "Unsupported sort direction: {other}"
                    )))
                }
            };

            Ok(ResolvedSort { column, ascending })
        })
        .collect()
}
