/// Database access layer
///
/// Per-entity query modules over `sqlx`/Postgres. Functions take `&PgPool`;
/// helpers that must run inside a caller-owned transaction take
/// `&mut Transaction` instead.
pub mod books;
pub mod refresh_tokens;
pub mod reviews;
pub mod users;
