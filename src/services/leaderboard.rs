//! Leaderboard aggregation.
//!
//! Rebuilds a cup's leaderboard from scratch out of every raw result stored
//! under the cup's qualifiers: group by player, sum awarded points, OR the
//! qualification flags, sort by points descending and assign competition
//! ranks. The stored entries are always replaced wholesale inside one
//! transaction, never patched.

use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};
use tracing::info;

use crate::db::Db;
use crate::error::AppError;
use crate::models::leaderboard::LeaderboardEntry;
use crate::models::results::RawResult;
use crate::services::scoring;

/// Fold raw results into one unranked entry per player, in first-seen
/// order. A player's qualified flag is sticky: once any single result
/// qualifies, later non-qualifying results leave it set.
pub fn accumulate(results: &[RawResult]) -> Vec<LeaderboardEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<LeaderboardEntry> = Vec::new();

    for result in results {
        let slot = *index.entry(result.player.as_str()).or_insert_with(|| {
            totals.push(LeaderboardEntry {
                player: result.player.clone(),
                points: 0,
                qualified: false,
                position: 0,
            });
            totals.len() - 1
        });

        let entry = &mut totals[slot];
        entry.points += scoring::points_for(&result.server, result.position, result.points);
        if scoring::is_qualifying(&result.server, result.position) {
            entry.qualified = true;
        }
    }

    totals
}

/// Sort by points descending and assign competition ranks in one pass.
///
/// Qualified entries take the current rank as they arrive and grow the
/// running block without any points comparison; non-qualified entries
/// advance the rank by the size of that block whenever their points differ
/// from the previous entry, and tie with it otherwise. The first
/// non-qualified entry therefore jumps past the whole qualified block.
///
/// The sort is stable with no secondary key, so the relative order of
/// exact point-and-qualification ties follows the input order and is not
/// otherwise meaningful.
pub fn rank(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.points.cmp(&a.points));

    let mut current_rank: i64 = 1;
    let mut rank_count: i64 = 0;
    let mut previous_points: Option<i64> = None;

    for entry in entries.iter_mut() {
        if entry.qualified {
            entry.position = current_rank;
            rank_count += 1;
        } else if previous_points != Some(entry.points) {
            current_rank += rank_count;
            rank_count = 1;
            entry.position = current_rank;
        } else {
            entry.position = current_rank;
            rank_count += 1;
        }
        previous_points = Some(entry.points);
    }

    entries
}

/// Recompute and store the leaderboard for a cup.
///
/// Runs as a single transaction: the read of raw results and the
/// delete-then-insert of entries either all happen or none do, so readers
/// never observe a partial leaderboard. A missing cup or leaderboard row
/// aborts with nothing written.
pub fn rebuild(db: &Db, cup_id: &str) -> Result<Vec<LeaderboardEntry>, AppError> {
    let entries = db.with_tx(|tx| {
        let cup_exists: Option<String> = tx
            .query_row("SELECT id FROM cups WHERE id = ?1", params![cup_id], |row| {
                row.get(0)
            })
            .optional()
            .map_err(AppError::Db)?;
        if cup_exists.is_none() {
            return Err(AppError::NotFound(format!("Cup {} not found", cup_id)));
        }

        let leaderboard_id: String = tx
            .query_row(
                "SELECT id FROM leaderboards WHERE cup_id = ?1",
                params![cup_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(AppError::Db)?
            .ok_or_else(|| AppError::NotFound(format!("Cup {} has no leaderboard", cup_id)))?;

        let mut stmt = tx.prepare(
            "SELECT r.player, r.server, r.position, r.points
             FROM raw_results r
             JOIN qualifiers q ON q.id = r.qualifier_id
             WHERE q.cup_id = ?1
             ORDER BY r.rowid",
        )?;
        let rows = stmt.query_map(params![cup_id], |row| {
            Ok(RawResult {
                player: row.get(0)?,
                server: row.get(1)?,
                position: row.get(2)?,
                points: row.get(3)?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        let entries = rank(accumulate(&results));

        tx.execute(
            "DELETE FROM leaderboard_entries WHERE leaderboard_id = ?1",
            params![leaderboard_id],
        )?;
        for entry in &entries {
            tx.execute(
                "INSERT INTO leaderboard_entries (leaderboard_id, player, points, qualified, position)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    leaderboard_id,
                    entry.player,
                    entry.points,
                    entry.qualified as i64,
                    entry.position,
                ],
            )?;
        }

        Ok(entries)
    })?;

    info!(cup_id, entries = entries.len(), "leaderboard rebuilt");
    Ok(entries)
}

/// Read the stored leaderboard for a cup, in rank order.
pub fn get_leaderboard(db: &Db, cup_id: &str) -> Result<Vec<LeaderboardEntry>, AppError> {
    let leaderboard_id: String = db
        .with_conn(|conn| {
            conn.query_row(
                "SELECT id FROM leaderboards WHERE cup_id = ?1",
                params![cup_id],
                |row| row.get(0),
            )
            .optional()
        })?
        .ok_or_else(|| AppError::NotFound(format!("Cup {} not found", cup_id)))?;

    Ok(db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT player, points, qualified, position
             FROM leaderboard_entries WHERE leaderboard_id = ?1
             ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![leaderboard_id], |row| {
            Ok(LeaderboardEntry {
                player: row.get(0)?,
                points: row.get(1)?,
                qualified: row.get::<_, i64>(2)? != 0,
                position: row.get(3)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(player: &str, server: &str, position: i64, points: i64) -> RawResult {
        RawResult {
            player: player.into(),
            server: server.into(),
            position,
            points,
        }
    }

    #[test]
    fn accumulate_sums_points_per_player() {
        let results = vec![
            result("alice", scoring::SERVER_NATIONS, 1, 0),
            result("alice", scoring::SERVER_NATIONS, 2, 0),
            result("bob", scoring::SERVER_NATIONS, 3, 0),
        ];
        let totals = accumulate(&results);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].player, "alice");
        assert_eq!(totals[0].points, 12_500);
        assert_eq!(totals[1].player, "bob");
        assert_eq!(totals[1].points, 5_500);
    }

    #[test]
    fn accumulate_qualified_flag_is_sticky() {
        let results = vec![
            result("alice", scoring::SERVER_UNITED, 2, 0),
            result("alice", scoring::SERVER_UNITED, 40, 100),
            result("alice", scoring::SERVER_NATIONS, 1, 0),
        ];
        let totals = accumulate(&results);

        assert_eq!(totals.len(), 1);
        assert!(totals[0].qualified);
        assert_eq!(totals[0].points, 50_000 + 100 + 6_500);
    }

    #[test]
    fn accumulate_skips_players_without_results() {
        assert!(accumulate(&[]).is_empty());
    }

    #[test]
    fn rank_end_to_end_scenario() {
        let results = vec![
            result("p1", scoring::SERVER_UNITED, 1, 0),
            result("p2", scoring::SERVER_UNITED, 4, 0),
            result("p3", scoring::SERVER_UNITED, 10, 7_200),
        ];
        let entries = rank(accumulate(&results));

        assert_eq!(entries[0].player, "p1");
        assert_eq!(entries[0].points, 50_000);
        assert!(entries[0].qualified);
        assert_eq!(entries[0].position, 1);

        assert_eq!(entries[1].player, "p2");
        assert_eq!(entries[1].points, 15_000);
        assert!(!entries[1].qualified);
        assert_eq!(entries[1].position, 2);

        assert_eq!(entries[2].player, "p3");
        assert_eq!(entries[2].points, 7_500);
        assert!(!entries[2].qualified);
        assert_eq!(entries[2].position, 3);
    }

    #[test]
    fn rank_qualified_block_shares_rank_one() {
        let results = vec![
            result("p1", scoring::SERVER_UNITED, 1, 0),
            result("p2", scoring::SERVER_UNITED, 2, 0),
            result("p3", scoring::SERVER_UNITED, 3, 0),
            result("p4", scoring::SERVER_UNITED, 4, 0),
            result("p5", scoring::SERVER_UNITED, 5, 0),
        ];
        let entries = rank(accumulate(&results));

        // All qualified entries hold rank 1; the first non-qualified entry
        // jumps past the whole block.
        assert!(entries[0..3].iter().all(|e| e.qualified && e.position == 1));
        assert_eq!(entries[3].position, 4);
        assert_eq!(entries[4].position, 5);
    }

    #[test]
    fn rank_ties_share_rank_and_next_jumps() {
        let results = vec![
            result("p1", scoring::SERVER_NATIONS, 9, 4_700),
            result("p2", scoring::SERVER_NATIONS, 12, 4_800),
            result("p3", scoring::SERVER_NATIONS, 20, 1_234),
        ];
        let entries = rank(accumulate(&results));

        // p1 and p2 both land on the 5000 threshold award.
        assert_eq!(entries[0].points, 5_000);
        assert_eq!(entries[1].points, 5_000);
        assert_eq!(entries[0].position, 1);
        assert_eq!(entries[1].position, 1);
        assert_eq!(entries[2].position, 3);
    }

    #[test]
    fn rank_is_non_decreasing() {
        let results = vec![
            result("p1", scoring::SERVER_UNITED, 1, 0),
            result("p2", scoring::SERVER_UNITED, 2, 0),
            result("p3", scoring::SERVER_UNITED, 4, 0),
            result("p4", scoring::SERVER_UNITED, 9, 7_000),
            result("p5", scoring::SERVER_UNITED, 11, 7_000),
            result("p6", scoring::SERVER_NATIONS, 1, 0),
            result("p7", scoring::SERVER_NATIONS, 14, 200),
        ];
        let entries = rank(accumulate(&results));

        for pair in entries.windows(2) {
            assert!(pair[0].position <= pair[1].position);
            assert!(pair[0].points >= pair[1].points);
        }
    }

    #[test]
    fn rank_without_qualified_entries_starts_at_one() {
        let results = vec![
            result("p1", scoring::SERVER_NATIONS, 1, 0),
            result("p2", scoring::SERVER_NATIONS, 2, 0),
        ];
        let entries = rank(accumulate(&results));

        assert_eq!(entries[0].position, 1);
        assert_eq!(entries[1].position, 2);
    }

    #[test]
    fn rank_is_idempotent() {
        let results = vec![
            result("p1", scoring::SERVER_UNITED, 1, 0),
            result("p2", scoring::SERVER_UNITED, 4, 0),
            result("p3", scoring::SERVER_NATIONS, 2, 0),
            result("p4", scoring::SERVER_NATIONS, 30, 4_800),
        ];
        let first = rank(accumulate(&results));
        let second = rank(accumulate(&results));
        assert_eq!(first, second);
    }

    #[test]
    fn rank_empty_input() {
        assert!(rank(Vec::new()).is_empty());
    }
}
