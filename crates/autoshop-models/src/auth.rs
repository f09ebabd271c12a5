//! Authentication request and response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use autoshop_core::Role;

use crate::ids::{BranchId, OrganizationId};
use crate::users::User;

pub use autoshop_auth::{Claims, RefreshTokenClaims};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    #[schema(example = "owner@shop.test")]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Self-service registration. Role defaults to `client`; `super_admin` is
/// rejected.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub organization_id: Option<OrganizationId>,
    pub branch_id: Option<BranchId>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LogoutRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

impl TokenPair {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Returned by login and register.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register() -> RegisterRequest {
        RegisterRequest {
            email: "new@shop.test".to_string(),
            password: "longenough".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: None,
            role: None,
            organization_id: None,
            branch_id: None,
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register().validate().is_ok());

        let short = RegisterRequest {
            password: "short".to_string(),
            ..register()
        };
        assert!(short.validate().unwrap_err().field_errors().contains_key("password"));

        let bad_email = RegisterRequest {
            email: "nope".to_string(),
            ..register()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_register_role_parses_snake_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.test","password":"longenough","first_name":"A","last_name":"B","role":"super_admin"}"#,
        )
        .unwrap();
        assert_eq!(req.role, Some(Role::SuperAdmin));
    }

    #[test]
    fn test_token_pair_is_bearer() {
        let pair = TokenPair::bearer("a".into(), "r".into(), 900);
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["token_type"], "Bearer");
        assert_eq!(json["expires_in"], 900);
    }
}
