//! Middleware and extractors for cross-cutting request concerns.
//!
//! - [`auth`]: bearer token authentication and permission extractors
//! - [`role`]: role guards
//! - [`tenant`]: organization and branch guards
//! - [`rate_limit`]: per-peer limiting of the auth endpoints
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::authenticate`] verifies the token and attaches the `Principal`
//! 3. Role, tenant and branch layers check the attached principal
//! 4. Permission extractors such as `RequireClientsRead` check the permission
//! 5. Handler executes if all checks pass
//!
//! ```ignore
//! Router::new()
//!     .route("/", get(list_clients))
//!     .route_layer(middleware::from_fn(require_branch_layer))
//!     .route_layer(middleware::from_fn(require_tenant_layer))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
//! ```

pub mod auth;
pub mod rate_limit;
pub mod role;
pub mod tenant;
