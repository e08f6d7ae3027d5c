// Integration tests for the catalog surface: book CRUD, pagination,
// search, reviews, and the admin counters.

use sqlx::PgPool;

use bookverse_api::db;
use bookverse_api::error::AppError;
use bookverse_api::models::{CreateBookRequest, CreateReviewRequest, Role, UpdateBookRequest};
use bookverse_api::services::{BookService, ReviewService};

fn book(title: &str, author: &str, genre: &str) -> CreateBookRequest {
    CreateBookRequest {
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
        description: String::new(),
        image_url: None,
    }
}

async fn seed_user(pool: &PgPool, username: &str, banned: bool) -> bookverse_api::models::User {
    let user = db::users::create_user(
        pool,
        username,
        &format!("{}@x.com", username),
        "$argon2id$fake$hash",
        Role::User,
    )
    .await
    .unwrap();

    if banned {
        db::users::set_banned(pool, user.id, true).await.unwrap();
    }

    db::users::find_by_id(pool, user.id).await.unwrap().unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn create_get_update_delete_book(pool: PgPool) {
    let service = BookService::new(pool.clone());

    let created = service
        .create_book(book("Dune", "Frank Herbert", "Fiction"))
        .await
        .unwrap();

    let fetched = service.get_book(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Dune");
    assert_eq!(fetched.average_rating, 0.0);

    let updated = service
        .update_book(
            created.id,
            UpdateBookRequest {
                title: "Dune Messiah".to_string(),
                author: "Frank Herbert".to_string(),
                genre: "Fiction".to_string(),
                description: "The sequel.".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Dune Messiah");

    assert!(service.delete_book(created.id).await.unwrap());
    assert!(service.get_book(created.id).await.unwrap().is_none());
    assert!(!service.delete_book(created.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn pagination_envelope_is_consistent(pool: PgPool) {
    let service = BookService::new(pool.clone());
    for i in 0..25 {
        service
            .create_book(book(&format!("Book {:02}", i), "Author", "Fiction"))
            .await
            .unwrap();
    }

    let first = service.list_books(0, 12, "title", "asc").await.unwrap();
    assert_eq!(first.books.len(), 12);
    assert_eq!(first.total_items, 25);
    assert_eq!(first.total_pages, 3);
    assert!(first.has_next);
    assert!(!first.has_previous);
    assert_eq!(first.books[0].title, "Book 00");

    let last = service.list_books(2, 12, "title", "asc").await.unwrap();
    assert_eq!(last.books.len(), 1);
    assert!(!last.has_next);
    assert!(last.has_previous);
}

#[sqlx::test(migrations = "./migrations")]
async fn combined_search_spans_title_author_and_genre(pool: PgPool) {
    let service = BookService::new(pool.clone());
    service
        .create_book(book("Neuromancer", "William Gibson", "Science Fiction"))
        .await
        .unwrap();
    service
        .create_book(book("Gibbon's Decline", "Sheri Tepper", "Fiction"))
        .await
        .unwrap();

    let by_author = service
        .search_books(Some("gibson"), None, None, None, 0, 12, "createdAt", "desc")
        .await
        .unwrap();
    assert_eq!(by_author.total_items, 1);
    assert_eq!(by_author.books[0].title, "Neuromancer");

    let by_genre = service
        .search_books(Some("science"), None, None, None, 0, 12, "createdAt", "desc")
        .await
        .unwrap();
    assert_eq!(by_genre.total_items, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn filtered_search_is_conjunctive(pool: PgPool) {
    let service = BookService::new(pool.clone());
    service
        .create_book(book("Foundation", "Isaac Asimov", "Science Fiction"))
        .await
        .unwrap();
    service
        .create_book(book("Foundation and Empire", "Isaac Asimov", "Science Fiction"))
        .await
        .unwrap();
    service
        .create_book(book("I, Robot", "Isaac Asimov", "Science Fiction"))
        .await
        .unwrap();

    let page = service
        .search_books(
            None,
            Some("foundation"),
            Some("asimov"),
            None,
            0,
            12,
            "title",
            "asc",
        )
        .await
        .unwrap();
    assert_eq!(page.total_items, 2);
    assert_eq!(page.books[0].title, "Foundation");
}

#[sqlx::test(migrations = "./migrations")]
async fn reviews_feed_average_rating_and_top_rated(pool: PgPool) {
    let books = BookService::new(pool.clone());
    let reviews = ReviewService::new(pool.clone());
    let reader = seed_user(&pool, "reader", false).await;

    let good = books.create_book(book("Good", "A", "Fiction")).await.unwrap();
    let bad = books.create_book(book("Bad", "B", "Fiction")).await.unwrap();

    for rating in [5, 4] {
        reviews
            .add_review(
                &reader,
                CreateReviewRequest {
                    book_id: good.id,
                    rating,
                    review_text: "nice".to_string(),
                },
            )
            .await
            .unwrap();
    }
    reviews
        .add_review(
            &reader,
            CreateReviewRequest {
                book_id: bad.id,
                rating: 1,
                review_text: String::new(),
            },
        )
        .await
        .unwrap();

    let summary = books.get_book(good.id).await.unwrap().unwrap();
    assert!((summary.average_rating - 4.5).abs() < f64::EPSILON);

    let top = books.top_rated(10).await.unwrap();
    assert_eq!(top[0].title, "Good");

    let for_book = reviews.reviews_for_book(good.id).await.unwrap();
    assert_eq!(for_book.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn review_validation_and_ban_check(pool: PgPool) {
    let books = BookService::new(pool.clone());
    let reviews = ReviewService::new(pool.clone());

    let reader = seed_user(&pool, "reader", false).await;
    let banned = seed_user(&pool, "troll", true).await;
    let target = books.create_book(book("Target", "A", "Fiction")).await.unwrap();

    let bad_rating = reviews
        .add_review(
            &reader,
            CreateReviewRequest {
                book_id: target.id,
                rating: 6,
                review_text: String::new(),
            },
        )
        .await
        .expect_err("rating out of range must fail");
    assert!(matches!(bad_rating, AppError::BadRequest(_)));

    let from_banned = reviews
        .add_review(
            &banned,
            CreateReviewRequest {
                book_id: target.id,
                rating: 3,
                review_text: String::new(),
            },
        )
        .await
        .expect_err("banned account must not post");
    assert!(matches!(from_banned, AppError::Forbidden(_)));

    let missing_book = reviews
        .add_review(
            &reader,
            CreateReviewRequest {
                book_id: target.id + 999,
                rating: 3,
                review_text: String::new(),
            },
        )
        .await
        .expect_err("unknown book must fail");
    assert!(matches!(missing_book, AppError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_user_cascades_reviews_and_tokens(pool: PgPool) {
    let books = BookService::new(pool.clone());
    let reviews = ReviewService::new(pool.clone());
    let reader = seed_user(&pool, "reader", false).await;

    let target = books.create_book(book("Target", "A", "Fiction")).await.unwrap();
    reviews
        .add_review(
            &reader,
            CreateReviewRequest {
                book_id: target.id,
                rating: 4,
                review_text: String::new(),
            },
        )
        .await
        .unwrap();

    let sessions = bookverse_api::services::SessionService::new(pool.clone(), 7);
    sessions.create_session(reader.id).await.unwrap();

    assert!(db::users::delete_user(&pool, reader.id).await.unwrap());

    assert_eq!(db::reviews::count_for_user(&pool, reader.id).await.unwrap(), 0);
    let live = db::refresh_tokens::list_live_for_user(&pool, reader.id)
        .await
        .unwrap();
    assert!(live.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_counters_reflect_the_data(pool: PgPool) {
    let books = BookService::new(pool.clone());
    seed_user(&pool, "reader", false).await;
    seed_user(&pool, "troll", true).await;
    books.create_book(book("One", "A", "Fiction")).await.unwrap();

    assert_eq!(db::users::count_users(&pool).await.unwrap(), 2);
    assert_eq!(db::users::count_banned(&pool).await.unwrap(), 1);
    assert_eq!(db::books::count_books(&pool).await.unwrap(), 1);
    assert_eq!(db::reviews::count_reviews(&pool).await.unwrap(), 0);

    let genres = books.genres().await.unwrap();
    assert_eq!(genres, vec!["Fiction".to_string()]);
}
