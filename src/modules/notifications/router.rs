use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::authenticate;
use crate::state::AppState;

use super::controller::{list_notifications, mark_notification_read};

pub fn init_notifications_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/{id}/read", post(mark_notification_read))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
