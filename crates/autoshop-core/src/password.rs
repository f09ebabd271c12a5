//! Password hashing with bcrypt.
//!
//! bcrypt salts every hash and its verification compares in constant time.

use bcrypt::{hash, verify};

use crate::errors::AppError;

pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Lowest cost bcrypt accepts. Only suitable for tests.
pub const MIN_COST: u32 = 4;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password_with_cost("correct horse", MIN_COST).unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password_with_cost("same", MIN_COST).unwrap();
        let b = hash_password_with_cost("same", MIN_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_invalid_hash_errors() {
        assert!(verify_password("pw", "not_a_bcrypt_hash").is_err());
    }
}
