use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tracing::info;
use uuid::Uuid;

use crate::db::Db;
use crate::error::AppError;
use crate::models::cups::*;

fn now_stamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Create a cup together with its leaderboard. Every cup owns exactly one
/// leaderboard, so both rows are inserted in the same transaction.
pub fn create_cup(db: &Db, req: CupCreateRequest) -> Result<Cup, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Cup name must not be empty".into()));
    }

    let cup = Cup {
        id: Uuid::new_v4().to_string(),
        name,
        season: req.season,
        created_at: now_stamp(),
    };
    let leaderboard_id = Uuid::new_v4().to_string();

    db.with_tx(|tx| {
        tx.execute(
            "INSERT INTO cups (id, name, season, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![cup.id, cup.name, cup.season, cup.created_at],
        )?;
        tx.execute(
            "INSERT INTO leaderboards (id, cup_id, created_at) VALUES (?1, ?2, ?3)",
            params![leaderboard_id, cup.id, cup.created_at],
        )?;
        Ok::<_, rusqlite::Error>(())
    })?;

    info!(cup_id = %cup.id, name = %cup.name, "cup created");
    Ok(cup)
}

pub fn list_cups(db: &Db) -> Result<Vec<Cup>, AppError> {
    Ok(db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, name, season, created_at FROM cups ORDER BY created_at, rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Cup {
                id: row.get(0)?,
                name: row.get(1)?,
                season: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;

        let mut cups = Vec::new();
        for row in rows {
            cups.push(row?);
        }
        Ok(cups)
    })?)
}

/// Fetch one cup with its qualifying rounds.
pub fn get_cup(db: &Db, cup_id: &str) -> Result<CupDetail, AppError> {
    let cup = db
        .with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, season, created_at FROM cups WHERE id = ?1",
                params![cup_id],
                |row| {
                    Ok(Cup {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        season: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()
        })?
        .ok_or_else(|| AppError::NotFound(format!("Cup {} not found", cup_id)))?;

    let qualifiers = db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, cup_id, name, created_at FROM qualifiers
             WHERE cup_id = ?1 ORDER BY created_at, rowid",
        )?;
        let rows = stmt.query_map(params![cup_id], |row| {
            Ok(Qualifier {
                id: row.get(0)?,
                cup_id: row.get(1)?,
                name: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;

        let mut qualifiers = Vec::new();
        for row in rows {
            qualifiers.push(row?);
        }
        Ok(qualifiers)
    })?;

    Ok(CupDetail { cup, qualifiers })
}

/// Add a qualifying round to a cup.
pub fn create_qualifier(
    db: &Db,
    cup_id: &str,
    req: QualifierCreateRequest,
) -> Result<Qualifier, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest(
            "Qualifier name must not be empty".into(),
        ));
    }

    let exists: Option<String> = db.with_conn(|conn| {
        conn.query_row("SELECT id FROM cups WHERE id = ?1", params![cup_id], |row| {
            row.get(0)
        })
        .optional()
    })?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!("Cup {} not found", cup_id)));
    }

    let qualifier = Qualifier {
        id: Uuid::new_v4().to_string(),
        cup_id: cup_id.to_string(),
        name,
        created_at: now_stamp(),
    };

    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO qualifiers (id, cup_id, name, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                qualifier.id,
                qualifier.cup_id,
                qualifier.name,
                qualifier.created_at
            ],
        )
    })?;

    Ok(qualifier)
}
