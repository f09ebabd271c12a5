//! # Autoshop API
//!
//! Backend for multi-tenant car service shops, built with Axum and
//! PostgreSQL.
//!
//! - **Authentication**: JWT access tokens plus rotating refresh tokens with
//!   reuse detection
//! - **Role-Based Access Control**: one role per user, a static
//!   role → permission table, and per-route permission guards
//! - **Tenant scoping**: every query on shop data is confined to the
//!   caller's organization, and branch staff to their branch
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── autoshop-core/     # AppError, roles, permission table, filters, pagination
//! ├── autoshop-config/   # JWT, CORS, rate limit and server configuration
//! ├── autoshop-auth/     # tokens, Principal, can/is_role, tenant/branch scoping
//! ├── autoshop-models/   # ids, records, DTOs, domain events
//! ├── autoshop-db/       # repository traits, PostgreSQL and in-memory stores
//! └── autoshop-cli/      # administrative commands
//! src/
//! ├── middleware/        # authentication, role/tenant guards, rate limiting
//! ├── modules/           # auth, organizations, branches, clients, cars, notifications
//! ├── events.rs          # domain event bus and handlers
//! ├── logging.rs         # tracing setup and request logging
//! └── metrics.rs         # Prometheus metrics
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic
//! - `router.rs`: Axum router and its guard layers
//! - `model.rs`: module-local DTOs, where needed
//!
//! ## Role Hierarchy
//!
//! ```text
//! Super Admin (CLI-created, no organization)
//!     ↓ creates
//! Organizations + Owners
//!     ↓ run
//! Branches with Managers and Mechanics, plus Admins and Accountants
//!     ↓ serve
//! Clients
//! ```
//!
//! ## Configuration
//!
//! Environment variables (a `.env` file is loaded at startup):
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATABASE_URL` | PostgreSQL connection string | required for `postgres` |
//! | `STORAGE_BACKEND` | `postgres` or `memory` | `postgres` |
//! | `JWT_SECRET` | Access token signing secret | development placeholder |
//! | `JWT_REFRESH_SECRET` | Refresh token signing secret | development placeholder |
//! | `JWT_ACCESS_EXPIRY` | Access token lifetime, seconds | `900` |
//! | `JWT_REFRESH_EXPIRY` | Refresh token lifetime, seconds | `604800` |
//! | `CORS_ALLOWED_ORIGINS` | Comma-separated origins | `http://localhost:3000,http://localhost:3001` |
//! | `RATE_LIMIT_ENABLED` | Rate limit the auth endpoints | `true` |
//! | `SERVER_HOST` / `SERVER_PORT` | Bind address | `0.0.0.0` / `3000` |
//! | `OBSERVABILITY_ENABLED` | Prometheus metrics | `true` |

pub mod docs;
pub mod events;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use router::init_router;
pub use state::{AppState, Storage};
