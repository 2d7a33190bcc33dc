//! Execution seam for compiled map search statements.
//!
//! The compiler produces a strictly-ordered positional parameter list; this
//! module binds it without re-deriving order and decodes rows. Database
//! errors propagate unchanged; retries and timeouts belong to the caller.

use sqlx::PgConnection;

use super::query_builder::{BindValue, QueryWithArgs};
use crate::models::MapSearchResult;
use crate::Result;

/// Run a compiled map search, binding values in placeholder order, and
/// decode each row into a [`MapSearchResult`].
pub async fn fetch_maps(
    conn: &mut PgConnection,
    compiled: QueryWithArgs,
) -> Result<Vec<MapSearchResult>> {
    tracing::debug!(bind_count = compiled.args.len(), "executing map search");

    let mut query = sqlx::query_as::<_, MapSearchResult>(&compiled.sql);
    for value in compiled.args {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::TextArray(vs) => query.bind(vs),
            BindValue::Int(v) => query.bind(v),
            BindValue::IntArray(vs) => query.bind(vs),
            BindValue::Float(v) => query.bind(v),
            BindValue::Bool(v) => query.bind(v),
        };
    }

    let rows = query
        .fetch_all(&mut *conn)
        .await
        .map_err(crate::Error::Database)?;

    Ok(rows)
}
