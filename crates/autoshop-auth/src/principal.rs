use autoshop_core::{AppError, Role};
use uuid::Uuid;

use crate::claims::Claims;

/// The authenticated identity behind one request.
///
/// Rebuilt from the access token on every request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub organization_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub permissions: Vec<String>,
}

impl Principal {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    pub fn is_super_admin(&self) -> bool {
        self.role.is_super_admin()
    }
}

impl TryFrom<Claims> for Principal {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid token subject"))?;

        Ok(Self {
            user_id,
            email: claims.email,
            role: claims.role,
            organization_id: claims.organization_id,
            branch_id: claims.branch_id,
            permissions: claims.permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "m@shop.test".to_string(),
            role: Role::Mechanic,
            organization_id: Some(Uuid::new_v4()),
            branch_id: Some(Uuid::new_v4()),
            permissions: vec!["cars:read".to_string()],
            iss: "autoshop".to_string(),
            exp: 2,
            iat: 1,
        }
    }

    #[test]
    fn test_from_claims() {
        let user_id = Uuid::new_v4();
        let source = claims(&user_id.to_string());
        let principal = Principal::try_from(source.clone()).unwrap();

        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.role, Role::Mechanic);
        assert_eq!(principal.branch_id, source.branch_id);
        assert!(principal.has_permission("cars:read"));
        assert!(!principal.has_permission("cars:delete"));
    }

    #[test]
    fn test_bad_subject_is_unauthorized() {
        let err = Principal::try_from(claims("not-a-uuid")).unwrap_err();
        assert!(err.is_unauthorized());
    }
}
