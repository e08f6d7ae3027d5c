/// Review database operations
use crate::error::Result;
use crate::models::Review;
use sqlx::PgPool;

/// Insert a review
pub async fn insert(
    pool: &PgPool,
    book_id: i64,
    user_id: i64,
    rating: i32,
    review_text: &str,
) -> Result<Review> {
    let review = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (book_id, user_id, rating, review_text)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(book_id)
    .bind(user_id)
    .bind(rating)
    .bind(review_text)
    .fetch_one(pool)
    .await?;

    Ok(review)
}

/// List all reviews
pub async fn list_all(pool: &PgPool) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(reviews)
}

/// Reviews for one book
pub async fn list_for_book(pool: &PgPool, book_id: i64) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE book_id = $1 ORDER BY created_at DESC",
    )
    .bind(book_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Delete a review; returns false when it does not exist
pub async fn delete(pool: &PgPool, review_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(review_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Number of reviews written by a user
pub async fn count_for_user(pool: &PgPool, user_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// A user's most recent reviews
pub async fn recent_for_user(pool: &PgPool, user_id: i64, limit: i64) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Total review count
pub async fn count_reviews(pool: &PgPool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
