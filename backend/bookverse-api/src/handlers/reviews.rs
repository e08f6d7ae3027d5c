/// Review handlers
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db;
use crate::error::{AppError, Result};
use crate::middleware::{AdminUser, AuthUser};
use crate::models::CreateReviewRequest;
use crate::services::ReviewService;

/// Post a review as the authenticated user
pub async fn add_review(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse> {
    let caller = db::users::find_by_username(&pool, &user.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".into()))?;

    let service = ReviewService::new((**pool).clone());
    let review = service.add_review(&caller, req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(review))
}

/// All reviews
pub async fn list_reviews(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = ReviewService::new((**pool).clone());
    let reviews = service.list_reviews().await?;

    Ok(HttpResponse::Ok().json(reviews))
}

/// Reviews for one book
pub async fn reviews_for_book(
    pool: web::Data<PgPool>,
    book_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = ReviewService::new((**pool).clone());
    let reviews = service.reviews_for_book(*book_id).await?;

    Ok(HttpResponse::Ok().json(reviews))
}

/// Delete a review (admin)
pub async fn delete_review(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    review_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = ReviewService::new((**pool).clone());
    if service.delete_review(*review_id).await? {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Review deleted successfully"
        })))
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
