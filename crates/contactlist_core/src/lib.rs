//! Data access for the contact list application.
//! Contacts and user accounts live in SQLite; callers go through the
//! repository traits or the thin services on top of them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{Contact, ContactId};
pub use model::search::{SearchCriteria, SearchTerm, SearchTermParseError};
pub use model::user::{User, UserValidationError, DEFAULT_AUTHORITY};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::contact_service::ContactService;
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
