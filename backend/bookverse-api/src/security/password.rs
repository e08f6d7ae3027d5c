/// Password hashing and verification using Argon2id
use crate::error::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using the Argon2id algorithm
///
/// A random 16-byte salt is generated per password; the result is a
/// PHC-formatted string safe for database storage. Hashing is CPU-bound:
/// request paths call this through `spawn_blocking`.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored hash
///
/// A malformed stored digest verifies as `false` rather than erroring, so
/// callers treat it exactly like a wrong password.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_valid_password() {
        let password = "secret1";
        let hash = hash_password(password).expect("should hash password successfully");
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("secret1").expect("should hash password successfully");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_verify_malformed_digest_is_false_not_error() {
        assert!(!verify_password("secret1", "not-a-phc-string"));
        assert!(!verify_password("secret1", ""));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hash1 = hash_password("secret1").expect("should hash successfully");
        let hash2 = hash_password("secret1").expect("should hash successfully");
        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
    }
}
