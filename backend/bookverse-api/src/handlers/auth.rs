/// Auth handlers - registration, login, token refresh, logout, profile
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest, UserProfile};
use crate::security::TokenCodec;
use crate::services::{AuthService, SessionService};

fn auth_service(
    pool: &web::Data<PgPool>,
    codec: &web::Data<TokenCodec>,
    sessions: &web::Data<SessionService>,
) -> AuthService {
    AuthService::new(
        (***pool).clone(),
        (***codec).clone(),
        (***sessions).clone(),
    )
}

/// Register a new account
pub async fn register(
    pool: web::Data<PgPool>,
    codec: web::Data<TokenCodec>,
    sessions: web::Data<SessionService>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    auth_service(&pool, &codec, &sessions)
        .register(req.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User registered successfully"
    })))
}

/// Authenticate and issue a token pair
pub async fn login(
    pool: web::Data<PgPool>,
    codec: web::Data<TokenCodec>,
    sessions: web::Data<SessionService>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let pair = auth_service(&pool, &codec, &sessions)
        .login(&req.username, &req.password)
        .await?;

    Ok(HttpResponse::Ok().json(pair))
}

/// Exchange a refresh token for a new pair
pub async fn refresh(
    pool: web::Data<PgPool>,
    codec: web::Data<TokenCodec>,
    sessions: web::Data<SessionService>,
    req: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    let pair = auth_service(&pool, &codec, &sessions)
        .refresh(&req.refresh_token)
        .await?;

    Ok(HttpResponse::Ok().json(pair))
}

/// Revoke the given refresh token, or all of the caller's tokens
pub async fn logout(
    pool: web::Data<PgPool>,
    codec: web::Data<TokenCodec>,
    sessions: web::Data<SessionService>,
    user: AuthUser,
    req: web::Json<LogoutRequest>,
) -> Result<HttpResponse> {
    let caller = db::users::find_by_username(&pool, &user.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".into()))?;

    auth_service(&pool, &codec, &sessions)
        .logout(caller.id, req.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logged out successfully"
    })))
}

/// Profile of the authenticated caller
pub async fn me(pool: web::Data<PgPool>, user: AuthUser) -> Result<HttpResponse> {
    let caller = db::users::find_by_username(&pool, &user.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".into()))?;

    Ok(HttpResponse::Ok().json(UserProfile::from(caller)))
}
