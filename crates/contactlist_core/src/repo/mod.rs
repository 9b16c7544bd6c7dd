//! Repository contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Map `Contact` and `User` values to and from their tables.
//! - Report semantic failures (`ContactNotFound`, `AmbiguousResult`, ...)
//!   alongside raw database errors.
//!
//! # Invariants
//! - Single-row lookups answer `Ok(None)` for zero rows; only lookups are
//!   allowed to turn "nothing there" into a non-error.
//! - Repositories only accept connections at the latest schema version.

use crate::db::DbError;
use crate::model::contact::ContactId;
use crate::model::user::UserValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact_repo;
mod schema;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error shared by the contact and user repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Driver, constraint or connectivity failure, passed through untouched.
    Db(DbError),
    Validation(UserValidationError),
    /// `update_contact` matched no row.
    ContactNotFound(ContactId),
    /// `update_contact` was given a contact that was never inserted.
    MissingContactId,
    /// A lookup by key produced more than one row.
    AmbiguousResult {
        table: &'static str,
        key: String,
    },
    DuplicateUsername(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::MissingContactId => write!(f, "contact has no id; add it before updating"),
            Self::AmbiguousResult { table, key } => {
                write!(f, "more than one row in `{table}` for key `{key}`")
            }
            Self::DuplicateUsername(username) => {
                write!(f, "username already exists: {username}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::ContactNotFound(_)
            | Self::MissingContactId
            | Self::AmbiguousResult { .. }
            | Self::DuplicateUsername(_)
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}
