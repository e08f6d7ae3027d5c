/// Root banner, connectivity probe, and health endpoints
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("BookVerse API is running! Use /api/books or /api/reviews")
}

/// Database connectivity probe
pub async fn db_status(pool: web::Data<PgPool>) -> HttpResponse {
    match db::users::count_users(&pool).await {
        Ok(user_count) => HttpResponse::Ok().json(serde_json::json!({
            "status": "connected",
            "userCount": user_count,
            "message": "Database connection successful",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "error",
            "message": format!("Database connection failed: {}", e),
        })),
    }
}

/// Liveness + database health summary
pub async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "bookverse-api",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "bookverse-api",
        })),
    }
}
