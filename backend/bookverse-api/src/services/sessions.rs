//! Refresh-token lifecycle
//!
//! Owns session creation, rotation, and revocation, and enforces the
//! single-active-session policy: issuing a token for a user first revokes
//! every other live token of that user, inside the same transaction.
//!
//! Per-token states: Active, then Rotated / Revoked / Expired — all
//! terminal. Expiry is observed lazily; `validate` rejects expired rows
//! whether or not the purge job has removed them yet.

use chrono::{Duration, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::RefreshToken;

#[derive(Clone)]
pub struct SessionService {
    pool: PgPool,
    ttl: Duration,
}

impl SessionService {
    pub fn new(pool: PgPool, refresh_ttl_days: i64) -> Self {
        Self {
            pool,
            ttl: Duration::days(refresh_ttl_days),
        }
    }

    /// Issue a fresh refresh token for the user
    ///
    /// Revokes every other live token and inserts the replacement in one
    /// transaction, so two concurrent calls can never both end up holding a
    /// live token.
    pub async fn create_session(&self, user_id: i64) -> Result<RefreshToken> {
        let mut tx = self.pool.begin().await?;
        let record = self.issue_in_tx(&mut tx, user_id).await?;
        tx.commit().await?;

        Ok(record)
    }

    async fn issue_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: i64,
    ) -> Result<RefreshToken> {
        db::refresh_tokens::revoke_all_for_user_tx(tx, user_id).await?;

        // UUIDv4 gives 122 bits of entropy; the UNIQUE constraint on the
        // token column is the backstop against a random collision.
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.ttl;

        db::refresh_tokens::insert(tx, user_id, &token, expires_at).await
    }

    /// Resolve a token string to a live record
    ///
    /// Missing, revoked (including rotated), and expired tokens are
    /// indistinguishable to the caller.
    pub async fn validate(&self, token: &str) -> Result<RefreshToken> {
        db::refresh_tokens::find_by_token(&self.pool, token)
            .await?
            .filter(RefreshToken::is_valid)
            .ok_or_else(AppError::invalid_refresh_token)
    }

    /// Replace a validated token with a fresh one
    ///
    /// The old row is revoked and the replacement inserted in a single
    /// transaction: a crash in between can only leave the user logged out,
    /// never with the old token still live. A later refresh attempt with
    /// the old (now revoked) token fails, which is what surfaces replay of
    /// a stolen token after legitimate rotation.
    pub async fn rotate(&self, old: &RefreshToken) -> Result<RefreshToken> {
        let mut tx = self.pool.begin().await?;
        db::refresh_tokens::revoke_by_id_tx(&mut tx, old.id).await?;
        let fresh = self.issue_in_tx(&mut tx, old.user_id).await?;
        tx.commit().await?;

        Ok(fresh)
    }

    /// Revoke a single token by its opaque string
    pub async fn revoke(&self, token: &str) -> Result<()> {
        db::refresh_tokens::revoke(&self.pool, token).await?;
        Ok(())
    }

    /// Revoke every token a user holds (logout-all, ban, delete)
    pub async fn revoke_for_user(&self, user_id: i64) -> Result<u64> {
        db::refresh_tokens::revoke_all_for_user(&self.pool, user_id).await
    }

    /// Drop expired rows; housekeeping only
    pub async fn purge_expired(&self) -> Result<u64> {
        db::refresh_tokens::delete_expired(&self.pool, Utc::now()).await
    }
}
