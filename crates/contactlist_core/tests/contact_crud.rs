use contactlist_core::db::migrations::latest_version;
use contactlist_core::db::{open_db, open_db_in_memory};
use contactlist_core::{
    Contact, ContactRepository, ContactService, RepoError, SqliteContactRepository,
};
use rusqlite::Connection;
use std::thread;

fn sample(first: &str, last: &str, company: &str) -> Contact {
    Contact::new(
        first,
        last,
        company,
        "555-0100",
        format!("{}@{}.example", first.to_lowercase(), company.to_lowercase()),
    )
}

#[test]
fn add_assigns_id_and_get_returns_same_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let input = sample("Ada", "Lovelace", "Analytical");
    assert!(input.contact_id.is_none());

    let created = repo.add_contact(&input).unwrap();
    let id = created.contact_id.unwrap();
    assert!(created.same_fields(&input));

    let loaded = repo.get_contact(id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn add_ignores_caller_supplied_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let first = repo.add_contact(&sample("A", "One", "Acme")).unwrap();
    let forged = sample("B", "Two", "Acme").with_id(first.contact_id.unwrap());
    let second = repo.add_contact(&forged).unwrap();

    assert_ne!(second.contact_id, first.contact_id);
    assert_eq!(repo.list_contacts().unwrap().len(), 2);
}

#[test]
fn get_missing_contact_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    assert!(repo.get_contact(42).unwrap().is_none());
}

#[test]
fn remove_then_get_is_none_and_remove_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let created = repo.add_contact(&sample("Grace", "Hopper", "Navy")).unwrap();
    let id = created.contact_id.unwrap();

    repo.remove_contact(id).unwrap();
    repo.remove_contact(id).unwrap();
    repo.remove_contact(9_999).unwrap();

    assert!(repo.get_contact(id).unwrap().is_none());
    assert!(repo.get_contact(9_999).unwrap().is_none());
}

#[test]
fn update_overwrites_every_field_but_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let mut contact = repo.add_contact(&sample("Alan", "Turing", "Bletchley")).unwrap();
    let untouched = repo.add_contact(&sample("Joan", "Clarke", "Bletchley")).unwrap();

    contact.first_name = "Alan M.".to_string();
    contact.company = "Manchester".to_string();
    contact.phone = "555-0199".to_string();
    contact.email = "alan@manchester.example".to_string();
    repo.update_contact(&contact).unwrap();

    let loaded = repo.get_contact(contact.contact_id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded, contact);
    let other = repo.get_contact(untouched.contact_id.unwrap()).unwrap().unwrap();
    assert_eq!(other, untouched);
}

#[test]
fn update_reports_missing_row_and_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let unsaved = sample("No", "Body", "Nowhere");
    assert!(matches!(
        repo.update_contact(&unsaved),
        Err(RepoError::MissingContactId)
    ));

    let ghost = unsaved.with_id(77);
    assert!(matches!(
        repo.update_contact(&ghost),
        Err(RepoError::ContactNotFound(77))
    ));
}

#[test]
fn list_returns_every_row_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let a = repo.add_contact(&sample("A", "Smith", "Acme")).unwrap();
    let b = repo.add_contact(&sample("B", "Jones", "Globex")).unwrap();
    let c = repo.add_contact(&sample("C", "Smith", "Initech")).unwrap();

    assert_eq!(repo.list_contacts().unwrap(), vec![a, b, c]);
}

#[test]
fn get_reports_ambiguous_result_for_duplicate_ids() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE contacts (
            contact_id INTEGER NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            company TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL
        );
        INSERT INTO contacts VALUES (7, 'a', 'b', 'c', 'd', 'e');
        INSERT INTO contacts VALUES (7, 'f', 'g', 'h', 'i', 'j');",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let err = repo.get_contact(7).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AmbiguousResult { table: "contacts", ref key } if key == "7"
    ));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteContactRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_contacts_table_missing_a_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE contacts (
            contact_id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            company TEXT NOT NULL,
            phone TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteContactRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "contacts",
            column: "email"
        })
    ));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let created = service.add_contact(&sample("Service", "Layer", "Acme")).unwrap();
    let id = created.contact_id.unwrap();
    assert_eq!(service.get_contact(id).unwrap(), Some(created.clone()));

    let mut edited = created;
    edited.last_name = "Tier".to_string();
    service.update_contact(&edited).unwrap();
    assert_eq!(service.list_contacts().unwrap(), vec![edited]);

    service.remove_contact(id).unwrap();
    assert!(service.list_contacts().unwrap().is_empty());
}

#[test]
fn concurrent_adds_on_separate_connections_get_their_own_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.db");
    drop(open_db(&path).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let path = path.clone();
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let repo = SqliteContactRepository::try_new(&conn).unwrap();
                (0..25)
                    .map(|n| {
                        let input = Contact::new(
                            format!("w{worker}"),
                            format!("n{n}"),
                            "Acme",
                            "555-0100",
                            "x@acme.example",
                        );
                        repo.add_contact(&input).unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let created: Vec<Contact> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    let conn = open_db(&path).unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    for contact in &created {
        let stored = repo.get_contact(contact.contact_id.unwrap()).unwrap().unwrap();
        assert_eq!(&stored, contact);
    }
    assert_eq!(repo.list_contacts().unwrap().len(), created.len());
}
