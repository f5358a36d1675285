mod db;
mod error;
mod handlers;
mod models;
mod services;
mod validation;

use db::Db;
use ntex::web;
use ntex_cors::Cors;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[ntex::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "slipstream.db".into());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let db = Arc::new(Db::open(&db_path).expect("Failed to open database"));

    info!("Slipstream server starting on {}:{}", host, port);

    web::HttpServer::new(move || {
        web::App::new()
            .state(db.clone())
            .wrap(
                Cors::new()
                    .allowed_origin("*")
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type"])
                    .max_age(3600)
                    .finish(),
            )
            // Health check
            .route("/api/health", web::get().to(health))
            // Cups and qualifiers
            .route("/api/cups", web::post().to(handlers::cups::create_cup))
            .route("/api/cups", web::get().to(handlers::cups::list_cups))
            .route("/api/cups/{cup_id}", web::get().to(handlers::cups::get_cup))
            .route("/api/cups/{cup_id}/qualifiers", web::post().to(handlers::cups::create_qualifier))
            // Result ingestion
            .route("/api/qualifiers/{qualifier_id}/results", web::post().to(handlers::results::replace_results))
            // Leaderboard
            .route("/api/cups/{cup_id}/leaderboard", web::get().to(handlers::leaderboard::get_leaderboard))
            .route("/api/cups/{cup_id}/leaderboard/rebuild", web::post().to(handlers::leaderboard::rebuild_leaderboard))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}

async fn health() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
