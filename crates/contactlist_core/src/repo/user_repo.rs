//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist login accounts in `users` and their roles in `authorities`.
//!
//! # Invariants
//! - `add_user` writes the account and all of its roles in one immediate
//!   transaction; a failure leaves neither behind.
//! - Roles are removed with their user through `ON DELETE CASCADE`.
//! - Listings are ordered by username, roles by name.

use super::schema::{ensure_connection_ready, RequiredTable};
use super::{RepoError, RepoResult};
use crate::model::user::User;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const USERS_TABLE: RequiredTable = RequiredTable {
    name: "users",
    columns: &["username", "password", "enabled"],
};

const AUTHORITIES_TABLE: RequiredTable = RequiredTable {
    name: "authorities",
    columns: &["username", "authority"],
};

/// Persistence operations on user accounts.
pub trait UserRepository {
    /// Stores a new account and returns it as persisted.
    fn add_user(&mut self, user: &User) -> RepoResult<User>;
    /// Removes an account and its roles. Unknown usernames are not an error.
    fn delete_user(&self, username: &str) -> RepoResult<()>;
    fn get_user(&self, username: &str) -> RepoResult<Option<User>>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Wraps a migrated connection, checking `users` and `authorities` first.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[USERS_TABLE, AUTHORITIES_TABLE])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn add_user(&mut self, user: &User) -> RepoResult<User> {
        user.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if user_exists_in_tx(&tx, &user.username)? {
            return Err(RepoError::DuplicateUsername(user.username.clone()));
        }

        tx.execute(
            "INSERT INTO users (username, password, enabled) VALUES (?1, ?2, ?3);",
            params![
                user.username.as_str(),
                user.password.as_str(),
                bool_to_int(user.enabled),
            ],
        )?;
        for authority in &user.authorities {
            tx.execute(
                "INSERT OR IGNORE INTO authorities (username, authority) VALUES (?1, ?2);",
                params![user.username.as_str(), authority.as_str()],
            )?;
        }

        let stored = load_user(&tx, &user.username)?.ok_or_else(|| {
            RepoError::InvalidData(format!("user `{}` vanished during insert", user.username))
        })?;
        tx.commit()?;

        Ok(stored)
    }

    fn delete_user(&self, username: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM users WHERE username = ?1;", [username])?;
        Ok(())
    }

    fn get_user(&self, username: &str) -> RepoResult<Option<User>> {
        load_user(self.conn, username)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT username, password, enabled
             FROM users
             ORDER BY username ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(self.conn, row)?);
        }
        Ok(users)
    }
}

fn load_user(conn: &Connection, username: &str) -> RepoResult<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT username, password, enabled
         FROM users
         WHERE username = ?1;",
    )?;
    let mut rows = stmt.query([username])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_user_row(conn, row)?)),
        None => Ok(None),
    }
}

fn parse_user_row(conn: &Connection, row: &Row<'_>) -> RepoResult<User> {
    let username: String = row.get("username")?;
    let enabled = match row.get::<_, i64>("enabled")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid enabled value `{other}` in users.enabled"
            )));
        }
    };
    let authorities = load_authorities(conn, &username)?;

    Ok(User {
        password: row.get("password")?,
        username,
        enabled,
        authorities,
    })
}

fn load_authorities(conn: &Connection, username: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT authority
         FROM authorities
         WHERE username = ?1
         ORDER BY authority ASC;",
    )?;
    let mut rows = stmt.query([username])?;
    let mut authorities = Vec::new();
    while let Some(row) = rows.next()? {
        authorities.push(row.get(0)?);
    }
    Ok(authorities)
}

fn user_exists_in_tx(tx: &Transaction<'_>, username: &str) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1);",
        [username],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
