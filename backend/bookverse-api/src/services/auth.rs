//! Login, registration, and token-pair orchestration
//!
//! Login resolves the identifier by email first and username second, and
//! collapses unknown-identifier and wrong-password into one generic error
//! so the endpoint cannot be used to enumerate accounts. Banned accounts
//! get a distinct Forbidden response. Password hashing and verification are
//! CPU-bound and run on the blocking pool.

use sqlx::PgPool;
use tokio::task;
use validator::Validate;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{
    LogoutRequest, RegisterRequest, Role, TokenPairResponse, User, UserProfile,
};
use crate::security::{password, TokenCodec};
use crate::services::SessionService;

pub struct AuthService {
    pool: PgPool,
    codec: TokenCodec,
    sessions: SessionService,
}

impl AuthService {
    pub fn new(pool: PgPool, codec: TokenCodec, sessions: SessionService) -> Self {
        Self {
            pool,
            codec,
            sessions,
        }
    }

    /// Authenticate and issue an access token + refresh session
    pub async fn login(&self, identifier: &str, plain_password: &str) -> Result<TokenPairResponse> {
        if identifier.trim().is_empty() {
            return Err(AppError::BadRequest("Email/username is required".into()));
        }
        if plain_password.trim().is_empty() {
            return Err(AppError::BadRequest("Password is required".into()));
        }

        let user = db::users::find_by_identifier(&self.pool, identifier)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if user.banned {
            return Err(AppError::Forbidden("Account is banned".into()));
        }

        if !verify_blocking(plain_password, &user.password_hash).await? {
            return Err(AppError::invalid_credentials());
        }

        self.issue_pair(user).await
    }

    /// Register a new account
    ///
    /// The stored role is always USER regardless of what the caller sent;
    /// promotion is an admin-only operation.
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        req.validate()?;

        if db::users::email_exists(&self.pool, &req.email).await? {
            return Err(AppError::BadRequest("Email already exists".into()));
        }

        // The email doubles as the username when none was supplied
        let username = req
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| req.email.clone());

        if db::users::username_exists(&self.pool, &username).await? {
            return Err(AppError::BadRequest("Username already exists".into()));
        }

        let password_hash = hash_blocking(req.password).await?;

        db::users::create_user(&self.pool, &username, &req.email, &password_hash, Role::User).await
    }

    /// Exchange a live refresh token for a new token pair
    pub async fn refresh(&self, token: &str) -> Result<TokenPairResponse> {
        let old = self.sessions.validate(token).await?;
        let user = db::users::find_by_id(&self.pool, old.user_id)
            .await?
            .ok_or_else(AppError::invalid_refresh_token)?;

        let fresh = self.sessions.rotate(&old).await?;
        let access_token = self.codec.issue(&user.username, user.role)?;

        Ok(TokenPairResponse {
            access_token,
            refresh_token: fresh.token,
            user: UserProfile::from(user),
        })
    }

    /// Revoke one refresh token, or every token of the caller
    pub async fn logout(&self, caller_id: i64, req: LogoutRequest) -> Result<()> {
        if req.revoke_all {
            self.sessions.revoke_for_user(caller_id).await?;
        } else if let Some(token) = req.refresh_token.as_deref() {
            self.sessions.revoke(token).await?;
        }

        Ok(())
    }

    async fn issue_pair(&self, user: User) -> Result<TokenPairResponse> {
        let access_token = self.codec.issue(&user.username, user.role)?;
        let session = self.sessions.create_session(user.id).await?;

        Ok(TokenPairResponse {
            access_token,
            refresh_token: session.token,
            user: UserProfile::from(user),
        })
    }
}

/// Run password verification on the blocking pool
async fn verify_blocking(plain: &str, hash: &str) -> Result<bool> {
    let plain = plain.to_string();
    let hash = hash.to_string();

    task::spawn_blocking(move || password::verify_password(&plain, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
}

/// Run password hashing on the blocking pool
async fn hash_blocking(plain: String) -> Result<String> {
    task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}
