//! Access-token codec
//!
//! Stateless signer/verifier for short-lived bearer tokens. Tokens are HMAC
//! (HS256) signed with a process-wide secret and carry the subject username,
//! role, and a token-type marker so a refresh token can never pass as an
//! access token.
//!
//! The codec is constructed once at startup from [`JwtSettings`] and shared
//! as app data; there is no global key state.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::error::{AppError, Result};
use crate::models::Role;

/// Token-type marker embedded in every access token
pub const TOKEN_TYPE_ACCESS: &str = "access";

/// Access-token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role at issuance time
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type; always "access"
    pub token_type: String,
}

/// Signs and verifies access tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl TokenCodec {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            expiry: Duration::seconds(settings.expiry_seconds),
        }
    }

    /// Issue a signed access token for the given subject and role
    pub fn issue(&self, username: &str, role: Role) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign access token: {}", e)))
    }

    /// Verify a token and return its claims
    ///
    /// Signature mismatch, malformed structure, expiry, and token-type
    /// confusion all collapse into the same unauthorized error; callers
    /// cannot distinguish why a token was rejected.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        if data.claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(AppError::Unauthorized(
                "Invalid or expired token".to_string(),
            ));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec(expiry_seconds: i64) -> TokenCodec {
        TokenCodec::new(&JwtSettings {
            secret: "test-signing-secret-for-unit-tests".to_string(),
            expiry_seconds,
        })
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = test_codec(3600);
        let token = codec.issue("alice", Role::User).expect("should issue");

        let claims = codec.verify(&token).expect("should verify");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_admin_role_survives_round_trip() {
        let codec = test_codec(3600);
        let token = codec.issue("admin", Role::Admin).expect("should issue");
        assert_eq!(codec.verify(&token).unwrap().role, Role::Admin);
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let codec = test_codec(3600);
        assert!(codec.verify("not.a.token").is_err());
        assert!(codec.verify("").is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let codec = test_codec(3600);
        let token = codec.issue("alice", Role::User).expect("should issue");
        let tampered = token.replace('a', "b");
        assert!(codec.verify(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let codec = test_codec(3600);
        let other = TokenCodec::new(&JwtSettings {
            secret: "a-different-secret".to_string(),
            expiry_seconds: 3600,
        });

        let token = codec.issue("alice", Role::User).expect("should issue");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Expired beyond the decoder's default leeway
        let codec = test_codec(-120);
        let token = codec.issue("alice", Role::User).expect("should issue");
        assert!(codec.verify(&token).is_err());
    }

    #[test]
    fn test_refresh_type_marker_is_rejected() {
        let codec = test_codec(3600);

        let now = Utc::now();
        let claims = Claims {
            sub: "alice".to_string(),
            role: Role::User,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            token_type: "refresh".to_string(),
        };
        let forged = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-signing-secret-for-unit-tests".as_bytes()),
        )
        .unwrap();

        assert!(codec.verify(&forged).is_err());
    }
}
