pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenCodec};
