use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::authenticate;
use crate::middleware::tenant::{require_branch_layer, require_tenant_layer};
use crate::state::AppState;

use super::controller::{create_car, delete_car, get_car, list_cars};

pub fn init_cars_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_car).get(list_cars))
        .route("/{id}", get(get_car).delete(delete_car))
        .route_layer(middleware::from_fn(require_branch_layer))
        .route_layer(middleware::from_fn(require_tenant_layer))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
