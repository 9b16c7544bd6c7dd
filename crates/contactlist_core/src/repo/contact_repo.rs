//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD and equality search over the `contacts` table.
//! - Keep every SQL string for contacts inside this file.
//!
//! # Invariants
//! - Inserts read their generated key through `RETURNING`, in the same
//!   statement, so concurrent writers on other connections cannot interleave.
//! - Search predicates are assembled from `SearchTerm::column` only; values
//!   are always bound.
//! - Deletes are idempotent. Updates that match no row report `ContactNotFound`.

use super::schema::{ensure_connection_ready, RequiredTable};
use super::{RepoError, RepoResult};
use crate::model::contact::{Contact, ContactId};
use crate::model::search::SearchCriteria;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CONTACT_SELECT_SQL: &str = "SELECT
    contact_id,
    first_name,
    last_name,
    company,
    phone,
    email
FROM contacts";

const CONTACT_ORDER_SQL: &str = " ORDER BY contact_id ASC";

const CONTACTS_TABLE: RequiredTable = RequiredTable {
    name: "contacts",
    columns: &[
        "contact_id",
        "first_name",
        "last_name",
        "company",
        "phone",
        "email",
    ],
};

/// Persistence operations on contacts.
pub trait ContactRepository {
    /// Inserts `contact` (ignoring any id it carries) and returns it with the
    /// generated id filled in.
    fn add_contact(&self, contact: &Contact) -> RepoResult<Contact>;
    /// Deletes by id. Missing ids are not an error.
    fn remove_contact(&self, contact_id: ContactId) -> RepoResult<()>;
    /// Overwrites every field except the id.
    fn update_contact(&self, contact: &Contact) -> RepoResult<()>;
    fn get_contact(&self, contact_id: ContactId) -> RepoResult<Option<Contact>>;
    /// All contacts, oldest id first.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Contacts matching every predicate in `criteria`; empty criteria match all.
    fn search_contacts(&self, criteria: &SearchCriteria) -> RepoResult<Vec<Contact>>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when `contacts` is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[CONTACTS_TABLE])?;
        Ok(Self { conn })
    }

    fn query_contacts(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn add_contact(&self, contact: &Contact) -> RepoResult<Contact> {
        let contact_id: ContactId = self.conn.query_row(
            "INSERT INTO contacts (
                first_name,
                last_name,
                company,
                phone,
                email
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING contact_id;",
            params![
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.company.as_str(),
                contact.phone.as_str(),
                contact.email.as_str(),
            ],
            |row| row.get(0),
        )?;

        Ok(contact.with_id(contact_id))
    }

    fn remove_contact(&self, contact_id: ContactId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM contacts WHERE contact_id = ?1;",
            [contact_id],
        )?;
        Ok(())
    }

    fn update_contact(&self, contact: &Contact) -> RepoResult<()> {
        let contact_id = contact.contact_id.ok_or(RepoError::MissingContactId)?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                first_name = ?1,
                last_name = ?2,
                company = ?3,
                phone = ?4,
                email = ?5
             WHERE contact_id = ?6;",
            params![
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.company.as_str(),
                contact.phone.as_str(),
                contact.email.as_str(),
                contact_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::ContactNotFound(contact_id));
        }

        Ok(())
    }

    fn get_contact(&self, contact_id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE contact_id = ?1;"))?;
        let mut rows = stmt.query([contact_id])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let contact = parse_contact_row(row)?;

        if rows.next()?.is_some() {
            return Err(RepoError::AmbiguousResult {
                table: "contacts",
                key: contact_id.to_string(),
            });
        }

        Ok(Some(contact))
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.query_contacts(&format!("{CONTACT_SELECT_SQL}{CONTACT_ORDER_SQL};"), Vec::new())
    }

    fn search_contacts(&self, criteria: &SearchCriteria) -> RepoResult<Vec<Contact>> {
        if criteria.is_empty() {
            return self.list_contacts();
        }

        let (sql, bind_values) = build_search_query(criteria);
        self.query_contacts(&sql, bind_values)
    }
}

/// Builds `SELECT ... WHERE col = ? AND col = ? ...` for non-empty criteria.
fn build_search_query(criteria: &SearchCriteria) -> (String, Vec<Value>) {
    let mut sql = format!("{CONTACT_SELECT_SQL} WHERE ");
    let mut bind_values = Vec::with_capacity(criteria.len());

    for (position, (term, value)) in criteria.iter().enumerate() {
        if position > 0 {
            sql.push_str(" AND ");
        }
        sql.push_str(term.column());
        sql.push_str(" = ?");
        bind_values.push(Value::Text(value.clone()));
    }

    sql.push_str(CONTACT_ORDER_SQL);
    sql.push(';');
    (sql, bind_values)
}

/// Maps one `contacts` row to a [`Contact`].
fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    Ok(Contact {
        contact_id: Some(row.get("contact_id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        company: row.get("company")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
    })
}
