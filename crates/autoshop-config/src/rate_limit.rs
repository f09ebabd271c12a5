//! Rate limiting for the unauthenticated auth endpoints.
//!
//! Token bucket per socket peer address. Forwarding headers are not
//! consulted, so a client cannot pick its own bucket.
//!
//! - `RATE_LIMIT_ENABLED`: default `true`
//! - `RATE_LIMIT_AUTH_PER_SECOND`: seconds per replenished token, default 1
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size, default 10

use governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor settings for the auth routes, keyed on the connection's peer IP.
pub type AuthGovernorConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_per_second: 1,
            auth_burst_size: 10,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: crate::env_or("RATE_LIMIT_ENABLED", defaults.enabled),
            auth_per_second: crate::env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: crate::env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Governor config for the auth endpoints, or `None` when limiting is
    /// disabled. Zero values are raised to one.
    #[must_use]
    pub fn auth_governor_config(&self) -> Option<AuthGovernorConfig> {
        if !self.enabled {
            return None;
        }
        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second.max(1))
            .burst_size(self.auth_burst_size.max(1))
            .key_extractor(PeerIpKeyExtractor)
            .finish()
    }
}
