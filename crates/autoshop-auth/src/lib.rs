//! # Autoshop Auth
//!
//! Authentication and authorization building blocks for the Autoshop API:
//!
//! - [`claims`]: JWT claim structures for access and refresh tokens
//! - [`jwt`]: token creation and verification
//! - [`principal`]: the per-request authenticated identity
//! - [`rbac`]: permission and role guards
//! - [`tenancy`]: organization/branch guards and query filter derivation
//!
//! Nothing here touches storage or HTTP; the root crate wires these into
//! axum middleware and services.
//!
//! # Example
//!
//! ```ignore
//! use autoshop_auth::{Principal, can, combined_filter, verify_token};
//! use autoshop_core::{QueryFilter, permissions};
//!
//! let principal = Principal::try_from(verify_token(&token, &jwt_config)?)?;
//! can(Some(&principal), permissions::CLIENTS_READ)?;
//! let filter = combined_filter(&principal, QueryFilter::new());
//! ```

pub mod claims;
pub mod jwt;
pub mod principal;
pub mod rbac;
pub mod tenancy;

pub use claims::{Claims, RefreshTokenClaims};
pub use jwt::{
    create_access_token, create_refresh_token, token_digest, verify_refresh_token, verify_token,
};
pub use principal::Principal;
pub use rbac::{can, is_role};
pub use tenancy::{branch_filter, combined_filter, require_branch, require_tenant, tenant_filter};
