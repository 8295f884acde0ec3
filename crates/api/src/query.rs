//! Query parameter types shared by handler modules.

use serde::Deserialize;

/// `?limit=` for the history log. Absent or non-positive means "everything".
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// `?zone=` for the distinct-locations lookup.
#[derive(Debug, Deserialize)]
pub struct LocationParams {
    pub zone: Option<String>,
}
