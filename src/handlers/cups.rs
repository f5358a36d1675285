use crate::db::Db;
use crate::error::AppError;
use crate::models::cups::*;
use crate::services::cups as service;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn create_cup(
    db: web::types::State<Arc<Db>>,
    body: web::types::Json<CupCreateRequest>,
) -> Result<HttpResponse, AppError> {
    let cup = service::create_cup(&db, body.into_inner())?;
    Ok(HttpResponse::Created().json(&cup))
}

pub async fn list_cups(db: web::types::State<Arc<Db>>) -> Result<HttpResponse, AppError> {
    let cups = service::list_cups(&db)?;
    Ok(HttpResponse::Ok().json(&cups))
}

pub async fn get_cup(
    db: web::types::State<Arc<Db>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cup_id = path.into_inner();
    let detail = service::get_cup(&db, &cup_id)?;
    Ok(HttpResponse::Ok().json(&detail))
}

pub async fn create_qualifier(
    db: web::types::State<Arc<Db>>,
    path: web::types::Path<String>,
    body: web::types::Json<QualifierCreateRequest>,
) -> Result<HttpResponse, AppError> {
    let cup_id = path.into_inner();
    let qualifier = service::create_qualifier(&db, &cup_id, body.into_inner())?;
    Ok(HttpResponse::Created().json(&qualifier))
}
