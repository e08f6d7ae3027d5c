/// User database operations
use crate::error::Result;
use crate::models::{Role, User};
use sqlx::PgPool;

/// Find user by username
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Find user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Resolve a login identifier: email match wins, username is the fallback
pub async fn find_by_identifier(pool: &PgPool, identifier: &str) -> Result<Option<User>> {
    if let Some(user) = find_by_email(pool, identifier).await? {
        return Ok(Some(user));
    }
    find_by_username(pool, identifier).await
}

/// Find user by ID
pub async fn find_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Check if email exists
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Check if username exists
pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Create a new user
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// List all users
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(users)
}

/// Search users by username or email substring
pub async fn search_users(pool: &PgPool, query: &str) -> Result<Vec<User>> {
    let pattern = format!("%{}%", query);

    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT *
        FROM users
        WHERE username ILIKE $1 OR email ILIKE $1
        ORDER BY id
        "#,
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Set the banned flag; returns false when the user does not exist
pub async fn set_banned(pool: &PgPool, user_id: i64, banned: bool) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET banned = $2, updated_at = NOW() WHERE id = $1")
        .bind(user_id)
        .bind(banned)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Change a user's role; returns false when the user does not exist
pub async fn set_role(pool: &PgPool, user_id: i64, role: Role) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1")
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a user; reviews and refresh tokens go with it via FK cascade
pub async fn delete_user(pool: &PgPool, user_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Total user count
pub async fn count_users(pool: &PgPool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Count of banned users
pub async fn count_banned(pool: &PgPool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE banned")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
