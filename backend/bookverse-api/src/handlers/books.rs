/// Book handlers - catalog browsing, search, and CRUD
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::Result;
use crate::middleware::{AdminUser, AuthUser};
use crate::models::{CreateBookRequest, UpdateBookRequest};
use crate::services::BookService;

fn default_page_size() -> i64 {
    12
}

fn default_sort_by() -> String {
    "createdAt".to_string()
}

fn default_sort_dir() -> String {
    "desc".to_string()
}

fn default_top_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct TopRatedParams {
    #[serde(default = "default_top_limit")]
    pub limit: i64,
}

/// Create a new book (any authenticated user)
pub async fn create_book(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    req: web::Json<CreateBookRequest>,
) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    let book = service.create_book(req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(book))
}

/// Paginated book listing
pub async fn list_books(
    pool: web::Data<PgPool>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    let page = service
        .list_books(params.page, params.size, &params.sort_by, &params.sort_dir)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Full unpaginated listing
pub async fn list_books_simple(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    let books = service.list_books_simple().await?;

    Ok(HttpResponse::Ok().json(books))
}

/// Single book with its average rating
pub async fn get_book(pool: web::Data<PgPool>, book_id: web::Path<i64>) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    match service.get_book(*book_id).await? {
        Some(book) => Ok(HttpResponse::Ok().json(book)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Update a book (admin)
pub async fn update_book(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    book_id: web::Path<i64>,
    req: web::Json<UpdateBookRequest>,
) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    match service.update_book(*book_id, req.into_inner()).await? {
        Some(book) => Ok(HttpResponse::Ok().json(book)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a book (admin)
pub async fn delete_book(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    book_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    if service.delete_book(*book_id).await? {
        Ok(HttpResponse::Ok().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Substring search with pagination
pub async fn search_books(
    pool: web::Data<PgPool>,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    let page = service
        .search_books(
            params.query.as_deref(),
            params.title.as_deref(),
            params.author.as_deref(),
            params.genre.as_deref(),
            params.page,
            params.size,
            &params.sort_by,
            &params.sort_dir,
        )
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Books ranked by average rating
pub async fn top_rated(
    pool: web::Data<PgPool>,
    params: web::Query<TopRatedParams>,
) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    let books = service.top_rated(params.limit).await?;

    Ok(HttpResponse::Ok().json(books))
}

/// Distinct genres
pub async fn genres(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    let genres = service.genres().await?;

    Ok(HttpResponse::Ok().json(genres))
}
