use crate::db::Db;
use crate::error::AppError;
use crate::services::leaderboard as service;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn get_leaderboard(
    db: web::types::State<Arc<Db>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cup_id = path.into_inner();
    let entries = service::get_leaderboard(&db, &cup_id)?;
    Ok(HttpResponse::Ok().json(&entries))
}

pub async fn rebuild_leaderboard(
    db: web::types::State<Arc<Db>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cup_id = path.into_inner();
    let entries = service::rebuild(&db, &cup_id)?;
    Ok(HttpResponse::Ok().json(&entries))
}
