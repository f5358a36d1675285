use serde::{Deserialize, Serialize};

/// One raw per-round result as stored, scoring input for the aggregator.
#[derive(Debug, Clone)]
pub struct RawResult {
    pub player: String,
    pub server: String,
    pub position: i64,
    pub points: i64,
}

/// One row of an uploaded result batch.
#[derive(Debug, Deserialize)]
pub struct ResultRow {
    pub player: String,
    pub position: i64,
    pub points: i64,
}

/// Bulk upload for one (qualifier, server) pair. Replaces every raw result
/// previously stored for that exact pair.
#[derive(Debug, Deserialize)]
pub struct ResultsReplaceRequest {
    pub server: String,
    pub results: Vec<ResultRow>,
}

#[derive(Debug, Serialize)]
pub struct ResultsReplaceResult {
    pub cup_id: String,
    pub stored: usize,
    pub ranked: usize,
}
