/// Review operations
use sqlx::PgPool;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{CreateReviewRequest, Review, User};

pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Post a review on behalf of an authenticated user
    ///
    /// The banned flag is re-checked here: an outstanding access token does
    /// not let a banned account keep posting.
    pub async fn add_review(&self, user: &User, req: CreateReviewRequest) -> Result<Review> {
        if !(1..=5).contains(&req.rating) {
            return Err(AppError::BadRequest("Invalid review data".into()));
        }

        if user.banned {
            return Err(AppError::Forbidden("Account is banned".into()));
        }

        if !db::books::exists(&self.pool, req.book_id).await? {
            return Err(AppError::NotFound("Book not found".into()));
        }

        db::reviews::insert(&self.pool, req.book_id, user.id, req.rating, &req.review_text).await
    }

    pub async fn list_reviews(&self) -> Result<Vec<Review>> {
        db::reviews::list_all(&self.pool).await
    }

    pub async fn reviews_for_book(&self, book_id: i64) -> Result<Vec<Review>> {
        db::reviews::list_for_book(&self.pool, book_id).await
    }

    pub async fn delete_review(&self, review_id: i64) -> Result<bool> {
        db::reviews::delete(&self.pool, review_id).await
    }
}
