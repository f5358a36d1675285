//! Raw result ingestion.
//!
//! Results arrive as one batch per (qualifier, server) pair. Uploading a
//! batch discards everything previously stored for that exact pair, which
//! is how corrected result sheets are re-uploaded. After the batch lands,
//! the owning cup's leaderboard is rebuilt.

use rusqlite::{params, OptionalExtension};
use tracing::info;
use uuid::Uuid;

use crate::db::Db;
use crate::error::AppError;
use crate::models::results::{ResultsReplaceRequest, ResultsReplaceResult};
use crate::services::leaderboard;
use crate::validation;

pub fn replace_results(
    db: &Db,
    qualifier_id: &str,
    req: ResultsReplaceRequest,
) -> Result<ResultsReplaceResult, AppError> {
    let server = req.server.trim().to_string();
    if server.is_empty() {
        return Err(AppError::BadRequest("Server tag must not be empty".into()));
    }
    validation::validate_batch(&req.results)?;

    // Unrecognized server tags are accepted here; the scoring rules treat
    // them as zero-point results.
    let mut rows = Vec::with_capacity(req.results.len());
    for result in &req.results {
        let player = validation::validate_player(&result.player)?;
        validation::validate_position(result.position)?;
        validation::validate_points(result.points)?;
        rows.push((player, result.position, result.points));
    }

    let cup_id = db.with_tx(|tx| {
        let cup_id: String = tx
            .query_row(
                "SELECT cup_id FROM qualifiers WHERE id = ?1",
                params![qualifier_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(AppError::Db)?
            .ok_or_else(|| AppError::NotFound(format!("Qualifier {} not found", qualifier_id)))?;

        tx.execute(
            "DELETE FROM raw_results WHERE qualifier_id = ?1 AND server = ?2",
            params![qualifier_id, server],
        )?;
        for (player, position, points) in &rows {
            tx.execute(
                "INSERT INTO raw_results (id, qualifier_id, server, player, position, points)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    Uuid::new_v4().to_string(),
                    qualifier_id,
                    server,
                    player,
                    position,
                    points,
                ],
            )?;
        }

        Ok::<_, AppError>(cup_id)
    })?;

    info!(
        qualifier_id,
        %server,
        stored = rows.len(),
        "raw results replaced"
    );

    let entries = leaderboard::rebuild(db, &cup_id)?;

    Ok(ResultsReplaceResult {
        cup_id,
        stored: rows.len(),
        ranked: entries.len(),
    })
}
