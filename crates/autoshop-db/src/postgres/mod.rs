//! PostgreSQL implementations of the repository traits.

mod documents;
mod organizations;
mod users;

pub use documents::PgDocumentStore;
pub use organizations::PgOrganizationRepository;
pub use users::PgUserRepository;
