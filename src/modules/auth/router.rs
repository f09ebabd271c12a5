use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::authenticate;
use crate::middleware::rate_limit::with_auth_rate_limit;
use crate::state::AppState;

use super::controller::{get_me, login, logout, logout_all, refresh, register};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh));
    let public = with_auth_rate_limit(public, &state);

    let session = Router::new()
        .route("/logout", post(logout))
        .route("/logout-all", post(logout_all))
        .route("/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    public.merge(session)
}
