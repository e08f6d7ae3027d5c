/// Book database operations
///
/// Listings are served as `BookSummary` projections with the review-derived
/// average rating joined in. Sort columns come from a whitelist; the sort
/// parameter never reaches the SQL string unchecked.
use crate::error::Result;
use crate::models::{Book, BookSummary, CreateBookRequest, UpdateBookRequest};
use sqlx::PgPool;

const SUMMARY_SELECT: &str = r#"
    SELECT b.id, b.title, b.author, b.genre, b.description, b.image_url,
           COALESCE(AVG(r.rating), 0)::float8 AS average_rating
    FROM books b
    LEFT JOIN reviews r ON r.book_id = b.id
"#;

/// Map a caller-supplied sort key to a real column; unknown keys fall back
/// to the creation timestamp
pub fn sort_column(sort_by: &str) -> &'static str {
    match sort_by {
        "title" => "title",
        "author" => "author",
        "genre" => "genre",
        "viewCount" => "view_count",
        _ => "created_at",
    }
}

fn order_direction(sort_dir: &str) -> &'static str {
    if sort_dir.eq_ignore_ascii_case("asc") {
        "ASC"
    } else {
        "DESC"
    }
}

/// Paginated listing with average ratings
pub async fn list_page(
    pool: &PgPool,
    page: i64,
    size: i64,
    sort_by: &str,
    sort_dir: &str,
) -> Result<Vec<BookSummary>> {
    let sql = format!(
        "{} GROUP BY b.id ORDER BY b.{} {} LIMIT $1 OFFSET $2",
        SUMMARY_SELECT,
        sort_column(sort_by),
        order_direction(sort_dir),
    );

    let books = sqlx::query_as::<_, BookSummary>(&sql)
        .bind(size)
        .bind(page * size)
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Full unpaginated listing
pub async fn list_all(pool: &PgPool) -> Result<Vec<BookSummary>> {
    let sql = format!("{} GROUP BY b.id ORDER BY b.id", SUMMARY_SELECT);

    let books = sqlx::query_as::<_, BookSummary>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Single book with its average rating
pub async fn find_summary_by_id(pool: &PgPool, book_id: i64) -> Result<Option<BookSummary>> {
    let sql = format!("{} WHERE b.id = $1 GROUP BY b.id", SUMMARY_SELECT);

    let book = sqlx::query_as::<_, BookSummary>(&sql)
        .bind(book_id)
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

/// Check if a book exists
pub async fn exists(pool: &PgPool, book_id: i64) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
        .bind(book_id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Create a new book
pub async fn create_book(pool: &PgPool, req: &CreateBookRequest) -> Result<Book> {
    let book = sqlx::query_as::<_, Book>(
        r#"
        INSERT INTO books (title, author, genre, description, image_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&req.title)
    .bind(&req.author)
    .bind(&req.genre)
    .bind(&req.description)
    .bind(&req.image_url)
    .fetch_one(pool)
    .await?;

    Ok(book)
}

/// Update a book; None when it does not exist
pub async fn update_book(
    pool: &PgPool,
    book_id: i64,
    req: &UpdateBookRequest,
) -> Result<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(
        r#"
        UPDATE books
        SET title = $2, author = $3, genre = $4, description = $5,
            image_url = $6, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(book_id)
    .bind(&req.title)
    .bind(&req.author)
    .bind(&req.genre)
    .bind(&req.description)
    .bind(&req.image_url)
    .fetch_optional(pool)
    .await?;

    Ok(book)
}

/// Delete a book; reviews go with it via FK cascade
pub async fn delete_book(pool: &PgPool, book_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM books WHERE id = $1")
        .bind(book_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Combined substring search over title, author, and genre
pub async fn search_combined(
    pool: &PgPool,
    query: &str,
    page: i64,
    size: i64,
    sort_by: &str,
    sort_dir: &str,
) -> Result<(Vec<BookSummary>, i64)> {
    let pattern = format!("%{}%", query);

    let sql = format!(
        "{} WHERE b.title ILIKE $1 OR b.author ILIKE $1 OR b.genre ILIKE $1 \
         GROUP BY b.id ORDER BY b.{} {} LIMIT $2 OFFSET $3",
        SUMMARY_SELECT,
        sort_column(sort_by),
        order_direction(sort_dir),
    );

    let books = sqlx::query_as::<_, BookSummary>(&sql)
        .bind(&pattern)
        .bind(size)
        .bind(page * size)
        .fetch_all(pool)
        .await?;

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM books WHERE title ILIKE $1 OR author ILIKE $1 OR genre ILIKE $1",
    )
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    Ok((books, total))
}

/// Per-field filtered search; absent filters match everything
pub async fn search_filtered(
    pool: &PgPool,
    title: Option<&str>,
    author: Option<&str>,
    genre: Option<&str>,
    page: i64,
    size: i64,
    sort_by: &str,
    sort_dir: &str,
) -> Result<(Vec<BookSummary>, i64)> {
    let title_pattern = title.map(|t| format!("%{}%", t));
    let author_pattern = author.map(|a| format!("%{}%", a));
    let genre_pattern = genre.map(|g| format!("%{}%", g));

    let sql = format!(
        "{} WHERE ($1::text IS NULL OR b.title ILIKE $1) \
           AND ($2::text IS NULL OR b.author ILIKE $2) \
           AND ($3::text IS NULL OR b.genre ILIKE $3) \
         GROUP BY b.id ORDER BY b.{} {} LIMIT $4 OFFSET $5",
        SUMMARY_SELECT,
        sort_column(sort_by),
        order_direction(sort_dir),
    );

    let books = sqlx::query_as::<_, BookSummary>(&sql)
        .bind(&title_pattern)
        .bind(&author_pattern)
        .bind(&genre_pattern)
        .bind(size)
        .bind(page * size)
        .fetch_all(pool)
        .await?;

    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM books b
        WHERE ($1::text IS NULL OR b.title ILIKE $1)
          AND ($2::text IS NULL OR b.author ILIKE $2)
          AND ($3::text IS NULL OR b.genre ILIKE $3)
        "#,
    )
    .bind(&title_pattern)
    .bind(&author_pattern)
    .bind(&genre_pattern)
    .fetch_one(pool)
    .await?;

    Ok((books, total))
}

/// Books ranked by average rating
pub async fn top_rated(pool: &PgPool, limit: i64) -> Result<Vec<BookSummary>> {
    let sql = format!(
        "{} GROUP BY b.id ORDER BY COALESCE(AVG(r.rating), 0) DESC LIMIT $1",
        SUMMARY_SELECT,
    );

    let books = sqlx::query_as::<_, BookSummary>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Distinct genres, sorted
pub async fn distinct_genres(pool: &PgPool) -> Result<Vec<String>> {
    let genres =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT genre FROM books ORDER BY genre")
            .fetch_all(pool)
            .await?;

    Ok(genres)
}

/// Total book count
pub async fn count_books(pool: &PgPool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_whitelist() {
        assert_eq!(sort_column("title"), "title");
        assert_eq!(sort_column("viewCount"), "view_count");
        assert_eq!(sort_column("createdAt"), "created_at");
        // Injection attempts fall back to the default column
        assert_eq!(sort_column("id; DROP TABLE books"), "created_at");
    }

    #[test]
    fn test_order_direction_defaults_to_desc() {
        assert_eq!(order_direction("asc"), "ASC");
        assert_eq!(order_direction("ASC"), "ASC");
        assert_eq!(order_direction("desc"), "DESC");
        assert_eq!(order_direction("sideways"), "DESC");
    }
}
