/// HTTP request handlers per API scope
pub mod admin;
pub mod auth;
pub mod books;
pub mod home;
pub mod reviews;
