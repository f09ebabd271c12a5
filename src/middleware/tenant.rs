//! Tenant and branch route guards.
//!
//! Both expect [`super::auth::authenticate`] to have attached the principal;
//! without one they fail closed with `Forbidden`.

use axum::{extract::Request, middleware::Next, response::Response};

use autoshop_auth::{Principal, require_branch, require_tenant};
use autoshop_core::AppError;

use crate::metrics::track_authorization_denied;

pub async fn require_tenant_layer(req: Request, next: Next) -> Result<Response, AppError> {
    require_tenant(req.extensions().get::<Principal>()).inspect_err(|_| {
        track_authorization_denied("tenant");
    })?;
    Ok(next.run(req).await)
}

pub async fn require_branch_layer(req: Request, next: Next) -> Result<Response, AppError> {
    require_branch(req.extensions().get::<Principal>()).inspect_err(|_| {
        track_authorization_denied("branch");
    })?;
    Ok(next.run(req).await)
}
