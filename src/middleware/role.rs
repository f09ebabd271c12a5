//! Role-based route guards.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use autoshop_auth::{Principal, is_role};
use autoshop_core::{AppError, Role};

use crate::metrics::track_authorization_denied;

pub const SUPER_ADMIN_ONLY: &[Role] = &[Role::SuperAdmin];

/// Route layer: `Forbidden` unless the attached principal has one of `roles`.
///
/// ```ignore
/// router.route_layer(middleware::from_fn_with_state(SUPER_ADMIN_ONLY, require_roles))
/// ```
pub async fn require_roles(
    State(roles): State<&'static [Role]>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    is_role(req.extensions().get::<Principal>(), roles).inspect_err(|_| {
        track_authorization_denied("role");
    })?;
    Ok(next.run(req).await)
}
