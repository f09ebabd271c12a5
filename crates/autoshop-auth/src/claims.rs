//! JWT claim structures.
//!
//! - [`Claims`]: access token, carries the whole principal
//! - [`RefreshTokenClaims`]: refresh token, carries only the user id

use autoshop_core::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Access token claims.
///
/// Everything needed to authorize a request is embedded here, so guards never
/// hit the database. `organization_id` is absent only for super admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub organization_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub permissions: Vec<String>,
    pub iss: String,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
    /// Unique token id. Two refresh tokens issued in the same second for the
    /// same user still differ.
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_role_as_snake_case() {
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "owner@shop.test".to_string(),
            role: Role::SuperAdmin,
            organization_id: None,
            branch_id: None,
            permissions: vec!["organizations:create".to_string()],
            iss: "autoshop".to_string(),
            exp: 1_900_000_000,
            iat: 1_899_999_100,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "super_admin");
        assert!(json["organization_id"].is_null());
    }

    #[test]
    fn test_refresh_claims_have_no_profile_data() {
        let json = r#"{"sub":"u","iss":"autoshop","exp":2,"iat":1,"jti":"j"}"#;
        let claims: RefreshTokenClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "u");
        assert_eq!(claims.jti, "j");
    }
}
