use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use autoshop_auth::{Principal, verify_token};
use autoshop_config::JwtConfig;
use autoshop_core::{AppError, permissions};

use crate::state::AppState;

/// Decodes the `Authorization: Bearer` access token into a [`Principal`].
pub fn principal_from_headers(
    headers: &HeaderMap,
    jwt_config: &JwtConfig,
) -> Result<Principal, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

    Principal::try_from(verify_token(token, jwt_config)?)
}

/// Route layer: rejects unauthenticated requests with 401 and attaches the
/// principal to the request for the guards and handlers behind it.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = principal_from_headers(req.headers(), &state.jwt_config)?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Extractor for the authenticated principal.
///
/// Reuses the principal attached by [`authenticate`] when that layer ran,
/// otherwise decodes the bearer token itself.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(AuthUser(principal.clone()));
        }

        let principal = principal_from_headers(&parts.headers, &state.jwt_config)?;
        parts.extensions.insert(principal.clone());
        Ok(AuthUser(principal))
    }
}

/// Helper macro to create permission check extractors.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub autoshop_auth::Principal);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = autoshop_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let $crate::middleware::auth::AuthUser(principal) =
                    <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                        $crate::state::AppState,
                    >>::from_request_parts(parts, state)
                    .await?;

                autoshop_auth::can(Some(&principal), $permission).inspect_err(|_| {
                    $crate::metrics::track_authorization_denied("permission");
                })?;

                Ok($name(principal))
            }
        }
    };
}

// Clients
require_permission!(RequireClientsRead, permissions::CLIENTS_READ);
require_permission!(RequireClientsCreate, permissions::CLIENTS_CREATE);
require_permission!(RequireClientsUpdate, permissions::CLIENTS_UPDATE);
require_permission!(RequireClientsDelete, permissions::CLIENTS_DELETE);

// Cars
require_permission!(RequireCarsRead, permissions::CARS_READ);
require_permission!(RequireCarsCreate, permissions::CARS_CREATE);
require_permission!(RequireCarsDelete, permissions::CARS_DELETE);

// Branches
require_permission!(RequireBranchesRead, permissions::BRANCHES_READ);
require_permission!(RequireBranchesCreate, permissions::BRANCHES_CREATE);

// Organizations
require_permission!(RequireOrganizationsUpdate, permissions::ORGANIZATIONS_UPDATE);

// Notifications
require_permission!(RequireNotificationsRead, permissions::NOTIFICATIONS_READ);
