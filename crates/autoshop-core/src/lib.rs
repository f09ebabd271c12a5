//! # Autoshop Core
//!
//! Core types, errors, and utilities for the Autoshop API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`filter`]: Equality query filters used for tenant/branch scoping
//! - [`pagination`]: Pagination utilities for list endpoints
//! - [`password`]: Password hashing and verification
//! - [`permissions`]: Permission constants and the role → permission table
//! - [`roles`]: The closed set of user roles
//! - [`serde`]: Custom serde helpers for query parameters
//!
//! # Example
//!
//! ```ignore
//! use autoshop_core::{AppError, PermissionTable, Role, permissions};
//!
//! let table = PermissionTable::standard()?;
//! assert!(table.allows(Role::Owner, permissions::CLIENTS_DELETE));
//! assert!(!table.allows(Role::Client, permissions::CLIENTS_DELETE));
//! ```

pub mod errors;
pub mod filter;
pub mod pagination;
pub mod password;
pub mod permissions;
pub mod roles;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use filter::QueryFilter;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, hash_password_with_cost, verify_password};
pub use permissions::{PermissionTable, PermissionTableError};
pub use roles::{Role, UnknownRoleError};
