//! # Autoshop Config
//!
//! Configuration types for the Autoshop API, loaded from environment
//! variables with development defaults:
//!
//! - [`jwt`]: token signing secrets, lifetimes and issuer
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: auth endpoint rate limiting
//! - [`server`]: bind address and storage backend selection
//!
//! # Example
//!
//! ```ignore
//! use autoshop_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::{AuthGovernorConfig, RateLimitConfig};
pub use server::{ServerConfig, StorageBackend, UnknownBackendError};

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
