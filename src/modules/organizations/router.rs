use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::auth::authenticate;
use crate::middleware::role::{SUPER_ADMIN_ONLY, require_roles};
use crate::middleware::tenant::require_tenant_layer;
use crate::state::AppState;

use super::controller::{
    create_organization, get_current_organization, list_organizations, update_organization,
};

pub fn init_organizations_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_organization).get(list_organizations))
        .route_layer(middleware::from_fn_with_state(SUPER_ADMIN_ONLY, require_roles));

    let tenant = Router::new()
        .route("/current", get(get_current_organization))
        .route("/{id}", patch(update_organization))
        .route_layer(middleware::from_fn(require_tenant_layer));

    admin
        .merge(tenant)
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
