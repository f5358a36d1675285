use crate::db::Db;
use crate::error::AppError;
use crate::models::results::ResultsReplaceRequest;
use crate::services::results as service;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn replace_results(
    db: web::types::State<Arc<Db>>,
    path: web::types::Path<String>,
    body: web::types::Json<ResultsReplaceRequest>,
) -> Result<HttpResponse, AppError> {
    let qualifier_id = path.into_inner();
    let result = service::replace_results(&db, &qualifier_id, body.into_inner())?;
    Ok(HttpResponse::Ok().json(&result))
}
