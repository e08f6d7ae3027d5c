/// Business logic layer
pub mod auth;
pub mod books;
pub mod reviews;
pub mod seed;
pub mod sessions;

pub use auth::AuthService;
pub use books::BookService;
pub use reviews::ReviewService;
pub use sessions::SessionService;
