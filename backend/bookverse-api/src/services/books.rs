/// Book catalog operations: CRUD, pagination, and search
use sqlx::PgPool;

use crate::db;
use crate::error::Result;
use crate::models::{Book, BookPage, BookSummary, CreateBookRequest, UpdateBookRequest};

/// Upper bound on page size to keep listings cheap
const MAX_PAGE_SIZE: i64 = 100;

pub struct BookService {
    pool: PgPool,
}

impl BookService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_book(&self, req: CreateBookRequest) -> Result<Book> {
        db::books::create_book(&self.pool, &req).await
    }

    /// Paginated listing with the page envelope the clients expect
    pub async fn list_books(
        &self,
        page: i64,
        size: i64,
        sort_by: &str,
        sort_dir: &str,
    ) -> Result<BookPage> {
        let page = page.max(0);
        let size = size.clamp(1, MAX_PAGE_SIZE);

        let books = db::books::list_page(&self.pool, page, size, sort_by, sort_dir).await?;
        let total = db::books::count_books(&self.pool).await?;

        Ok(BookPage::new(books, page, size, total))
    }

    pub async fn list_books_simple(&self) -> Result<Vec<BookSummary>> {
        db::books::list_all(&self.pool).await
    }

    pub async fn get_book(&self, book_id: i64) -> Result<Option<BookSummary>> {
        db::books::find_summary_by_id(&self.pool, book_id).await
    }

    pub async fn update_book(&self, book_id: i64, req: UpdateBookRequest) -> Result<Option<Book>> {
        db::books::update_book(&self.pool, book_id, &req).await
    }

    pub async fn delete_book(&self, book_id: i64) -> Result<bool> {
        db::books::delete_book(&self.pool, book_id).await
    }

    /// Substring search: a combined `query` spans title/author/genre,
    /// otherwise the per-field filters apply conjunctively
    pub async fn search_books(
        &self,
        query: Option<&str>,
        title: Option<&str>,
        author: Option<&str>,
        genre: Option<&str>,
        page: i64,
        size: i64,
        sort_by: &str,
        sort_dir: &str,
    ) -> Result<BookPage> {
        let page = page.max(0);
        let size = size.clamp(1, MAX_PAGE_SIZE);

        let (books, total) = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                db::books::search_combined(&self.pool, q, page, size, sort_by, sort_dir).await?
            }
            None => {
                db::books::search_filtered(
                    &self.pool, title, author, genre, page, size, sort_by, sort_dir,
                )
                .await?
            }
        };

        Ok(BookPage::new(books, page, size, total))
    }

    pub async fn top_rated(&self, limit: i64) -> Result<Vec<BookSummary>> {
        db::books::top_rated(&self.pool, limit.clamp(1, MAX_PAGE_SIZE)).await
    }

    pub async fn genres(&self) -> Result<Vec<String>> {
        db::books::distinct_genres(&self.pool).await
    }
}
