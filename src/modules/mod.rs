pub mod auth;
pub mod branches;
pub mod cars;
pub mod clients;
pub mod notifications;
pub mod organizations;
