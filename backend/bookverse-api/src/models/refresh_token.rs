use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Persisted refresh-token record
///
/// The token string is opaque to clients and never reused. A record is
/// usable iff it is unrevoked and unexpired; both rotation and logout leave
/// it permanently revoked.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn is_valid(&self) -> bool {
        !self.revoked && self.expires_at > Utc::now()
    }
}
