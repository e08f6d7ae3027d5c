/// Admin handlers - user moderation and platform stats
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::db;
use crate::error::{AppError, Result};
use crate::middleware::AdminUser;
use crate::models::Role;
use crate::services::SessionService;

#[derive(Debug, Deserialize)]
pub struct UserSearchParams {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: String,
}

/// List all users
pub async fn list_users(pool: web::Data<PgPool>, _admin: AdminUser) -> Result<HttpResponse> {
    let users = db::users::list_users(&pool).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Search users by username or email substring
pub async fn search_users(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    params: web::Query<UserSearchParams>,
) -> Result<HttpResponse> {
    let users = db::users::search_users(&pool, &params.query).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Ban a user and kill their refresh sessions
///
/// Outstanding access tokens stay usable until natural expiry; revoking the
/// refresh tokens means the session dies at the next refresh.
pub async fn ban_user(
    pool: web::Data<PgPool>,
    sessions: web::Data<SessionService>,
    _admin: AdminUser,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    if !db::users::set_banned(&pool, *user_id, true).await? {
        return Ok(HttpResponse::NotFound().finish());
    }
    sessions.revoke_for_user(*user_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User banned successfully"
    })))
}

/// Lift a ban
pub async fn unban_user(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    if !db::users::set_banned(&pool, *user_id, false).await? {
        return Ok(HttpResponse::NotFound().finish());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User unbanned successfully"
    })))
}

/// Delete a user; reviews and refresh tokens cascade with the row
pub async fn delete_user(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    if !db::users::delete_user(&pool, *user_id).await? {
        return Ok(HttpResponse::NotFound().finish());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User deleted successfully"
    })))
}

/// Change a user's role
pub async fn update_user_role(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    user_id: web::Path<i64>,
    req: web::Json<RoleUpdateRequest>,
) -> Result<HttpResponse> {
    let role = Role::from_str(&req.role)
        .ok_or_else(|| AppError::BadRequest("Invalid role".into()))?;

    if !db::users::set_role(&pool, *user_id, role).await? {
        return Ok(HttpResponse::NotFound().finish());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User role updated successfully"
    })))
}

/// Per-user moderation details
pub async fn user_details(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let Some(user) = db::users::find_by_id(&pool, *user_id).await? else {
        return Ok(HttpResponse::NotFound().finish());
    };

    let review_count = db::reviews::count_for_user(&pool, user.id).await?;
    let recent_reviews = db::reviews::recent_for_user(&pool, user.id, 5).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": user,
        "reviewCount": review_count,
        "recentReviews": recent_reviews,
    })))
}

/// Platform-wide counters
pub async fn stats(pool: web::Data<PgPool>, _admin: AdminUser) -> Result<HttpResponse> {
    let total_users = db::users::count_users(&pool).await?;
    let total_books = db::books::count_books(&pool).await?;
    let total_reviews = db::reviews::count_reviews(&pool).await?;
    let banned_users = db::users::count_banned(&pool).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "totalUsers": total_users,
        "totalBooks": total_books,
        "totalReviews": total_reviews,
        "bannedUsers": banned_users,
    })))
}
