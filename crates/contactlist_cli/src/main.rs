//! `contactlist` command-line entry point.
//!
//! Opens the configured database, runs one command and prints the result as
//! pretty JSON on stdout.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{new_user, Cli, Command, ContactCommand, UserCommand};
use contactlist_core::db::open_db;
use contactlist_core::{
    init_logging, ContactService, CoreConfig, SearchCriteria, SqliteContactRepository,
    SqliteUserRepository, UserService,
};
use rusqlite::Connection;
use serde::Serialize;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.apply_overrides(CoreConfig::from_env());

    if let Some(log_dir) = &config.log_dir {
        let log_dir = std::path::absolute(log_dir)
            .with_context(|| format!("cannot resolve log directory `{}`", log_dir.display()))?;
        init_logging(&config.log_level, &log_dir)?;
    }

    let mut conn = open_db(&config.db_path)
        .with_context(|| format!("cannot open database `{}`", config.db_path.display()))?;

    match cli.command {
        Command::Contact(command) => run_contact(&conn, command),
        Command::User(command) => run_user(&mut conn, command),
    }
}

fn run_contact(conn: &Connection, command: ContactCommand) -> Result<()> {
    let service = ContactService::new(SqliteContactRepository::try_new(conn)?);

    match command {
        ContactCommand::Add(fields) => print_json(&service.add_contact(&fields.into_contact())?),
        ContactCommand::Get { id } => match service.get_contact(id)? {
            Some(contact) => print_json(&contact),
            None => bail!("contact {id} not found"),
        },
        ContactCommand::Update { id, fields } => {
            let contact = fields.into_contact().with_id(id);
            service.update_contact(&contact)?;
            print_json(&contact)
        }
        ContactCommand::Remove { id } => {
            service.remove_contact(id)?;
            Ok(())
        }
        ContactCommand::List => print_json(&service.list_contacts()?),
        ContactCommand::Search { predicates } => {
            let criteria: SearchCriteria = predicates.into_iter().collect();
            print_json(&service.search_contacts(&criteria)?)
        }
    }
}

fn run_user(conn: &mut Connection, command: UserCommand) -> Result<()> {
    let mut service = UserService::new(SqliteUserRepository::try_new(conn)?);

    match command {
        UserCommand::Add {
            username,
            password,
            authorities,
            disabled,
        } => {
            let user = new_user(username, password, authorities, disabled);
            print_json(&service.add_user(&user)?)
        }
        UserCommand::Get { username } => match service.get_user(&username)? {
            Some(user) => print_json(&user),
            None => bail!("user `{username}` not found"),
        },
        UserCommand::Delete { username } => {
            service.delete_user(&username)?;
            Ok(())
        }
        UserCommand::List => print_json(&service.list_users()?),
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
