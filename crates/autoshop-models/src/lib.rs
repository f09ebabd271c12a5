//! # Autoshop Models
//!
//! Domain models and DTOs for the Autoshop API.
//!
//! - [`ids`]: strongly typed ids
//! - [`users`]: stored user records and the sanitized profile
//! - [`organizations`]: tenants and branches
//! - [`auth`]: login/register/refresh DTOs
//! - [`clients`], [`cars`], [`notifications`]: tenant-scoped documents
//! - [`events`]: domain events
//!
//! # Example
//!
//! ```ignore
//! use autoshop_models::{User, UserRecord};
//!
//! let profile: User = record.into();
//! ```

pub mod auth;
pub mod cars;
pub mod clients;
pub mod documents;
pub mod events;
pub mod ids;
pub mod notifications;
pub mod organizations;
pub mod users;

pub use auth::{
    AuthResponse, LoginRequest, LogoutRequest, MessageResponse, RefreshTokenRequest,
    RegisterRequest, TokenPair,
};
pub use cars::{Car, CarFilterParams, CreateCarDto, PaginatedCarsResponse};
pub use clients::{
    Client, ClientFilterParams, CreateClientDto, PaginatedClientsResponse, UpdateClientDto,
};
pub use documents::Document;
pub use events::DomainEvent;
pub use ids::{BranchId, CarId, ClientId, NotificationId, OrganizationId, UserId};
pub use notifications::{Notification, NotificationKind};
pub use organizations::{
    Branch, CreateBranchDto, CreateOrganizationDto, Organization, OrganizationWithBranches,
    UpdateOrganizationDto,
};
pub use users::{NewUser, User, UserRecord};
