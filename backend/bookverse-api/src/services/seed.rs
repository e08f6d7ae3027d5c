//! Startup seed data
//!
//! Creates the default admin and test accounts when missing, and populates
//! the sample catalog when the books table is empty. Runs once from `main`
//! before the server starts accepting traffic.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::db;
use crate::error::Result;
use crate::models::Role;
use crate::security::password;

pub async fn run(pool: &PgPool) -> Result<()> {
    if let Err(e) = ensure_default_user(pool, "admin", "admin@example.com", "admin123", Role::Admin).await {
        warn!(error = %e, "Admin user creation skipped");
    }
    if let Err(e) = ensure_default_user(pool, "user", "user@example.com", "user123", Role::User).await {
        warn!(error = %e, "Test user creation skipped");
    }

    if db::books::count_books(pool).await? == 0 {
        seed_books(pool).await?;
    }

    Ok(())
}

async fn ensure_default_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    plain_password: &str,
    role: Role,
) -> Result<()> {
    if db::users::find_by_username(pool, username).await?.is_some() {
        return Ok(());
    }

    let hash = password::hash_password(plain_password)?;
    db::users::create_user(pool, username, email, &hash, role).await?;

    info!(username, "Default user created");
    Ok(())
}

async fn seed_books(pool: &PgPool) -> Result<()> {
    for (title, author, genre, description, image_url) in SAMPLE_BOOKS {
        sqlx::query(
            r#"
            INSERT INTO books (title, author, genre, description, image_url)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(genre)
        .bind(description)
        .bind(image_url)
        .execute(pool)
        .await?;
    }

    info!(count = SAMPLE_BOOKS.len(), "Sample books created");
    Ok(())
}

const SAMPLE_BOOKS: &[(&str, &str, &str, &str, &str)] = &[
    // Fiction
    ("The Great Gatsby", "F. Scott Fitzgerald", "Fiction", "A classic American novel about the Jazz Age.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1490528560i/4671.jpg"),
    ("To Kill a Mockingbird", "Harper Lee", "Fiction", "A gripping tale of racial injustice and childhood innocence.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1553383690i/2657.jpg"),
    ("1984", "George Orwell", "Fiction", "A dystopian social science fiction novel.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1532714506i/40961427.jpg"),
    ("The Catcher in the Rye", "J.D. Salinger", "Fiction", "A controversial novel about teenage rebellion.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1398034300i/5107.jpg"),
    ("Harry Potter and the Sorcerer's Stone", "J.K. Rowling", "Fiction", "A young wizard's journey begins.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1474154022i/3.jpg"),
    ("The Lord of the Rings", "J.R.R. Tolkien", "Fiction", "An epic fantasy adventure.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1566425108i/33.jpg"),
    ("Dune", "Frank Herbert", "Fiction", "A science fiction masterpiece about power and survival.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1555447414i/44767458.jpg"),
    ("The Handmaid's Tale", "Margaret Atwood", "Fiction", "A dystopian tale of women's rights and freedom.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1578028274i/38447.jpg"),
    // Non-fiction
    ("Sapiens", "Yuval Noah Harari", "Non-fiction", "A brief history of humankind and our species' journey.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1420585954i/23692271.jpg"),
    ("Educated", "Tara Westover", "Non-fiction", "A memoir about education and family in rural America.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1506026635i/35133922.jpg"),
    ("Becoming", "Michelle Obama", "Non-fiction", "The former First Lady's inspiring memoir.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1528206996i/38746485.jpg"),
    ("The Immortal Life of Henrietta Lacks", "Rebecca Skloot", "Non-fiction", "The story of cells that changed medical science.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1327878144i/6493208.jpg"),
    // Business
    ("Think and Grow Rich", "Napoleon Hill", "Business", "Classic principles of wealth and success.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1463241782i/30186948.jpg"),
    ("The Lean Startup", "Eric Ries", "Business", "How to build a successful startup efficiently.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1333576876i/10127019.jpg"),
    ("Good to Great", "Jim Collins", "Business", "Why some companies make the leap and others don't.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1397681917i/76865.jpg"),
    ("The Intelligent Investor", "Benjamin Graham", "Business", "The definitive book on value investing.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1391639125i/106835.jpg"),
    // Self-Help
    ("The 7 Habits of Highly Effective People", "Stephen Covey", "Self-Help", "Principles for personal and professional effectiveness.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1421842784i/36072.jpg"),
    ("How to Win Friends and Influence People", "Dale Carnegie", "Self-Help", "Timeless advice for building relationships.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1442726934i/4865.jpg"),
    ("Atomic Habits", "James Clear", "Self-Help", "An easy and proven way to build good habits.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1535115320i/40121378.jpg"),
    ("The Power of Now", "Eckhart Tolle", "Self-Help", "A guide to spiritual enlightenment and mindfulness.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1386925471i/6708.jpg"),
    // Biography
    ("Steve Jobs", "Walter Isaacson", "Biography", "The exclusive biography of Apple's co-founder.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1511288482i/11084145.jpg"),
    ("Long Walk to Freedom", "Nelson Mandela", "Biography", "The autobiography of South Africa's first Black president.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1327934888i/318431.jpg"),
    ("Einstein: His Life and Universe", "Walter Isaacson", "Biography", "The definitive biography of the greatest scientist.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1328011405i/10884.jpg"),
    ("The Diary of a Young Girl", "Anne Frank", "Biography", "The powerful diary of a Jewish girl during WWII.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1560816565i/48855.jpg"),
    // Science
    ("A Brief History of Time", "Stephen Hawking", "Science", "From the Big Bang to black holes.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1333578746i/3869.jpg"),
    ("The Code Breaker", "Walter Isaacson", "Science", "Jennifer Doudna and the future of the human race.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1582645471i/49247043.jpg"),
    ("Homo Deus", "Yuval Noah Harari", "Science", "A brief history of tomorrow and human evolution.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1468760805i/31138556.jpg"),
    ("The Innovators", "Walter Isaacson", "Science", "How a group of hackers and inventors created the digital revolution.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1410191571i/21856367.jpg"),
    // Mythology / Religious
    ("The Alchemist", "Paulo Coelho", "Mythology", "A mystical story about following your dreams.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1654371463i/18144590.jpg"),
    ("Mythology", "Edith Hamilton", "Mythology", "Timeless tales of gods and heroes.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1388188530i/19381.jpg"),
    ("The Power of Myth", "Joseph Campbell", "Mythology", "The role of myth in human civilization.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1436217186i/35519.jpg"),
    ("Siddhartha", "Hermann Hesse", "Religious", "A spiritual journey of self-discovery.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1428715580i/52036.jpg"),
    // Others
    ("The Art of War", "Sun Tzu", "Philosophy", "Ancient Chinese military strategy and philosophy.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1453417993i/10534.jpg"),
    ("Freakonomics", "Steven Levitt", "Economics", "A rogue economist explores the hidden side of everything.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1550695002i/1202.jpg"),
    ("The Subtle Art of Not Giving a F*ck", "Mark Manson", "Philosophy", "A counterintuitive approach to living a good life.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1465761302i/28257707.jpg"),
    ("Outliers", "Malcolm Gladwell", "Psychology", "The story of success and what makes high-achievers different.", "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1344266315i/3228917.jpg"),
];
