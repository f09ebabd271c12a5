use axum::{Router, middleware, routing::post};

use crate::middleware::auth::authenticate;
use crate::middleware::tenant::require_tenant_layer;
use crate::state::AppState;

use super::controller::{create_branch, list_branches};

pub fn init_branches_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_branch).get(list_branches))
        .route_layer(middleware::from_fn(require_tenant_layer))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
