use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::authenticate;
use crate::middleware::tenant::{require_branch_layer, require_tenant_layer};
use crate::state::AppState;

use super::controller::{create_client, delete_client, get_client, list_clients, update_client};

pub fn init_clients_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_client).get(list_clients))
        .route(
            "/{id}",
            get(get_client).patch(update_client).delete(delete_client),
        )
        .route_layer(middleware::from_fn(require_branch_layer))
        .route_layer(middleware::from_fn(require_tenant_layer))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
