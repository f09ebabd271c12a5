use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    middleware::map_response,
    response::{IntoResponse, Response},
};
use tower_governor::GovernorLayer;
use tracing::{debug, warn};

use autoshop_config::AuthGovernorConfig;
use autoshop_core::AppError;

use crate::metrics::track_authorization_denied;
use crate::state::AppState;

const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Puts a token bucket per socket peer in front of `router`, when enabled.
///
/// Requests must carry `ConnectInfo<SocketAddr>`, which the server provides
/// through `into_make_service_with_connect_info`.
pub fn with_auth_rate_limit(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let Some(config) = state.rate_limit_config.auth_governor_config() else {
        return router;
    };

    spawn_limiter_pruning(&config);

    router
        .layer(GovernorLayer::new(config))
        .layer(map_response(rate_limited_response))
}

/// Drops buckets that have refilled so idle peers do not accumulate.
fn spawn_limiter_pruning(config: &AuthGovernorConfig) {
    let limiter = config.limiter().clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            limiter.retain_recent();
            debug!(tracked_peers = limiter.len(), "Pruned auth rate limiter");
        }
    });
}

/// Rewrites the limiter's plain-text rejection into the JSON error body.
async fn rate_limited_response(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    warn!("Auth rate limit exceeded");
    track_authorization_denied("rate_limit");

    let mut limited =
        AppError::too_many_requests("Too many requests. Please try again later.").into_response();
    for name in ["retry-after", "x-ratelimit-after"] {
        if let Some(value) = response.headers().get(name) {
            limited.headers_mut().insert(name, value.clone());
        }
    }
    limited
}
