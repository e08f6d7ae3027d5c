/// Refresh-token database operations
///
/// Rows are append-only except for the revoked flag. The revoke-then-insert
/// steps of session creation and rotation must share one transaction, so
/// the mutating helpers here take `&mut Transaction`.
use crate::error::Result;
use crate::models::RefreshToken;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

/// Look up a token by its opaque string
pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<RefreshToken>> {
    let record = sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    Ok(record)
}

/// Insert a new token row inside the caller's transaction
pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<RefreshToken> {
    let record = sqlx::query_as::<_, RefreshToken>(
        r#"
        INSERT INTO refresh_tokens (token, user_id, expires_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(tx.as_mut())
    .await?;

    Ok(record)
}

/// Revoke every token belonging to a user inside the caller's transaction
pub async fn revoke_all_for_user_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE",
    )
    .bind(user_id)
    .execute(tx.as_mut())
    .await?;

    Ok(result.rows_affected())
}

/// Revoke a single token row by id inside the caller's transaction
pub async fn revoke_by_id_tx(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<()> {
    sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1")
        .bind(id)
        .execute(tx.as_mut())
        .await?;

    Ok(())
}

/// Revoke a single token by its opaque string (logout)
pub async fn revoke(pool: &PgPool, token: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Revoke every token belonging to a user (logout-all, ban)
pub async fn revoke_all_for_user(pool: &PgPool, user_id: i64) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE",
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Delete expired rows; `is_valid` already rejects them, this is housekeeping
pub async fn delete_expired(pool: &PgPool, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
        .bind(now)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// All live (unrevoked, unexpired) tokens for a user
pub async fn list_live_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<RefreshToken>> {
    let records = sqlx::query_as::<_, RefreshToken>(
        r#"
        SELECT *
        FROM refresh_tokens
        WHERE user_id = $1 AND revoked = FALSE AND expires_at > NOW()
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}
