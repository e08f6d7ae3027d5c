use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Book entity as stored
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub image_url: Option<String>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing projection with the review-derived average rating
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub image_url: Option<String>,
    pub average_rating: f64,
}

/// Pagination envelope for book listings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub books: Vec<BookSummary>,
    pub current_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl BookPage {
    pub fn new(books: Vec<BookSummary>, page: i64, size: i64, total_items: i64) -> Self {
        let total_pages = if size > 0 {
            (total_items + size - 1) / size
        } else {
            0
        };
        Self {
            books,
            current_page: page,
            total_items,
            total_pages,
            has_next: page + 1 < total_pages,
            has_previous: page > 0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_envelope_math() {
        let page = BookPage::new(Vec::new(), 0, 12, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(!page.has_previous);

        let last = BookPage::new(Vec::new(), 2, 12, 25);
        assert!(!last.has_next);
        assert!(last.has_previous);
    }

    #[test]
    fn test_page_envelope_empty() {
        let page = BookPage::new(Vec::new(), 0, 12, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }
}
