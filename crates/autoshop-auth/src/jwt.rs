//! Token signing and verification.
//!
//! Access and refresh tokens are HS256 JWTs signed with separate secrets from
//! [`JwtConfig`]. Verification checks signature, expiry and issuer; any
//! failure is reported as `Unauthorized` without further detail.
//!
//! # Example
//!
//! ```ignore
//! use autoshop_auth::{create_access_token, verify_token};
//!
//! let token = create_access_token(&principal, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use autoshop_config::JwtConfig;
use autoshop_core::AppError;

use crate::claims::{Claims, RefreshTokenClaims};
use crate::principal::Principal;

/// Returns `(iat, exp)` for a token living `ttl_seconds`.
fn timestamps(ttl_seconds: i64) -> (usize, usize) {
    let now = Utc::now().timestamp();
    (now as usize, now.saturating_add(ttl_seconds).max(0) as usize)
}

fn validation(issuer: &str) -> Validation {
    let mut validation = Validation::default();
    validation.set_issuer(&[issuer]);
    validation
}

/// Signs an access token carrying the whole principal.
pub fn create_access_token(principal: &Principal, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let (iat, exp) = timestamps(jwt_config.access_token_expiry);
    let claims = Claims {
        sub: principal.user_id.to_string(),
        email: principal.email.clone(),
        role: principal.role,
        organization_id: principal.organization_id,
        branch_id: principal.branch_id,
        permissions: principal.permissions.clone(),
        iss: jwt_config.issuer.clone(),
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(&jwt_config.issuer),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

/// Signs a refresh token for `user_id`. Every call yields a distinct token.
pub fn create_refresh_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let (iat, exp) = timestamps(jwt_config.refresh_token_expiry);
    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        iss: jwt_config.issuer.clone(),
        exp,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.refresh_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create refresh token: {}", e)))
}

pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.refresh_secret.as_bytes()),
        &validation(&jwt_config.issuer),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired refresh token"))
}

/// Hex SHA-256 of a refresh token. Only digests are persisted.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use autoshop_core::Role;

    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-access-secret-at-least-32-characters".to_string(),
            refresh_secret: "test-refresh-secret-at-least-32-characters".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604_800,
            issuer: "autoshop-test".to_string(),
        }
    }

    fn principal() -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            email: "manager@shop.test".to_string(),
            role: Role::Manager,
            organization_id: Some(Uuid::new_v4()),
            branch_id: Some(Uuid::new_v4()),
            permissions: vec!["clients:read".to_string()],
        }
    }

    #[test]
    fn test_access_token_carries_principal() {
        let config = config();
        let principal = principal();

        let token = create_access_token(&principal, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, principal.user_id.to_string());
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.organization_id, principal.organization_id);
        assert_eq!(claims.branch_id, principal.branch_id);
        assert_eq!(claims.permissions, principal.permissions);
        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(Principal::try_from(claims).unwrap(), principal);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = config();
        let token = create_access_token(&principal(), &config).unwrap();

        let other = JwtConfig {
            secret: "another-access-secret-at-least-32-chars".to_string(),
            ..config
        };
        assert!(verify_token(&token, &other).unwrap_err().is_unauthorized());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let config = config();
        let token = create_access_token(&principal(), &config).unwrap();

        let other = JwtConfig {
            issuer: "someone-else".to_string(),
            ..config
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = JwtConfig {
            access_token_expiry: -3600,
            ..config()
        };
        let token = create_access_token(&principal(), &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_refresh_tokens_are_unique() {
        let config = config();
        let user_id = Uuid::new_v4();

        let a = create_refresh_token(user_id, &config).unwrap();
        let b = create_refresh_token(user_id, &config).unwrap();
        assert_ne!(a, b);
        assert_eq!(verify_refresh_token(&a, &config).unwrap().sub, user_id.to_string());
    }

    #[test]
    fn test_token_kinds_not_interchangeable() {
        let config = config();
        let refresh = create_refresh_token(Uuid::new_v4(), &config).unwrap();
        let access = create_access_token(&principal(), &config).unwrap();

        assert!(verify_token(&refresh, &config).is_err());
        assert!(verify_refresh_token(&access, &config).is_err());
    }

    #[test]
    fn test_token_digest() {
        let digest = token_digest("abc");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(token_digest("abd"), digest);
    }
}
