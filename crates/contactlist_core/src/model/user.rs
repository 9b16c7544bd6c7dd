//! User account model.
//!
//! # Invariants
//! - `username` is the natural key and must not be blank.
//! - `authorities` hold role names (for example `ROLE_USER`); blank names are rejected.
//! - `password` is opaque here. Encoding happens before it reaches this crate.
//! - `password` is left out of serialized output.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Role granted to every account created through the default constructor.
pub const DEFAULT_AUTHORITY: &str = "ROLE_USER";

/// Application login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Accepted on input, never written back out.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub enabled: bool,
    pub authorities: Vec<String>,
}

/// Reasons a [`User`] cannot be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    BlankUsername,
    BlankAuthority { username: String },
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankUsername => write!(f, "username must not be blank"),
            Self::BlankAuthority { username } => {
                write!(f, "user `{username}` has a blank authority name")
            }
        }
    }
}

impl Error for UserValidationError {}

impl User {
    /// Creates an enabled account holding [`DEFAULT_AUTHORITY`].
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            enabled: true,
            authorities: vec![DEFAULT_AUTHORITY.to_string()],
        }
    }

    /// Adds `authority` unless the user already holds it.
    pub fn grant(mut self, authority: impl Into<String>) -> Self {
        let authority = authority.into();
        if !self.authorities.contains(&authority) {
            self.authorities.push(authority);
        }
        self
    }

    /// Checks the invariants listed in the module docs.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.username.trim().is_empty() {
            return Err(UserValidationError::BlankUsername);
        }
        if self.authorities.iter().any(|a| a.trim().is_empty()) {
            return Err(UserValidationError::BlankAuthority {
                username: self.username.clone(),
            });
        }
        Ok(())
    }
}
