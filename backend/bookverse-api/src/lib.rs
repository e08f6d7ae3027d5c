/// BookVerse API
///
/// Backend service for the BookVerse book-review catalog: user registration
/// and authentication (JWT access tokens + rotating refresh tokens), book
/// browsing and search, reviews, and admin moderation.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers per API scope
/// - `models`: Database entities and request/response types
/// - `services`: Business logic layer
/// - `db`: Database access layer
/// - `security`: Password hashing and the access-token codec
/// - `middleware`: Bearer-token authentication gate
/// - `jobs`: Background housekeeping
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod middleware;
pub mod models;
pub mod security;
pub mod services;

pub use config::Settings;
pub use error::{AppError, Result};
