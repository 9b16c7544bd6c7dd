//! Command-line surface of the `contactlist` binary.

use clap::{Args, Parser, Subcommand};
use contactlist_core::{Contact, ContactId, CoreConfig, SearchCriteria, SearchTerm, User};
use std::path::PathBuf;

/// Manage contacts and user accounts in a contact list database.
#[derive(Parser, Debug)]
#[command(name = "contactlist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides CONTACTLIST_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides CONTACTLIST_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write rolling logs to this directory (overrides CONTACTLIST_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Layers the global flags over `base`; flags that were not given keep
    /// the value from `base` (environment or built-in default).
    pub fn apply_overrides(&self, base: CoreConfig) -> CoreConfig {
        CoreConfig {
            db_path: self.db.clone().unwrap_or(base.db_path),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            log_dir: self.log_dir.clone().or(base.log_dir),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Contact operations
    #[command(subcommand)]
    Contact(ContactCommand),
    /// User account operations
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand, Debug)]
pub enum ContactCommand {
    /// Add a contact and print it with its new id
    Add(ContactFields),
    /// Print one contact
    Get { id: ContactId },
    /// Overwrite every field of an existing contact
    Update {
        id: ContactId,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Delete a contact (no error if it does not exist)
    Remove { id: ContactId },
    /// Print all contacts
    List,
    /// Print contacts matching every `--where term=value`
    Search {
        /// first_name|last_name|company|phone|email=VALUE, repeatable
        #[arg(long = "where", value_name = "TERM=VALUE", value_parser = SearchCriteria::parse_pair)]
        predicates: Vec<(SearchTerm, String)>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ContactFields {
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long, default_value = "")]
    pub company: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub email: String,
}

impl ContactFields {
    pub fn into_contact(self) -> Contact {
        Contact::new(
            self.first_name,
            self.last_name,
            self.company,
            self.phone,
            self.email,
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create an account (always granted ROLE_USER)
    Add {
        username: String,
        #[arg(long)]
        password: String,
        /// Extra role, repeatable
        #[arg(long = "authority")]
        authorities: Vec<String>,
        /// Create the account disabled
        #[arg(long)]
        disabled: bool,
    },
    /// Print one account
    Get { username: String },
    /// Delete an account (no error if it does not exist)
    Delete { username: String },
    /// Print all accounts
    List,
}

/// Builds the [`User`] described by `user add` arguments.
pub fn new_user(
    username: String,
    password: String,
    authorities: Vec<String>,
    disabled: bool,
) -> User {
    let mut user = authorities
        .into_iter()
        .fold(User::new(username, password), User::grant);
    user.enabled = !disabled;
    user
}
