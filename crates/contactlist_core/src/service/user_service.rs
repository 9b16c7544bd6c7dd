//! User account use-case service.

use crate::model::user::User;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoResult;
use log::{info, warn};

/// Use-case wrapper over a [`UserRepository`].
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an account. Passwords are never logged.
    pub fn add_user(&mut self, user: &User) -> RepoResult<User> {
        match self.repo.add_user(user) {
            Ok(stored) => {
                info!(
                    "event=user_add module=service status=ok username={} authorities={}",
                    stored.username,
                    stored.authorities.len()
                );
                Ok(stored)
            }
            Err(err) => {
                warn!("event=user_add module=service status=error error={err}");
                Err(err)
            }
        }
    }

    pub fn delete_user(&self, username: &str) -> RepoResult<()> {
        self.repo.delete_user(username)?;
        info!("event=user_delete module=service status=ok username={username}");
        Ok(())
    }

    pub fn get_user(&self, username: &str) -> RepoResult<Option<User>> {
        self.repo.get_user(username)
    }

    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.repo.list_users()
    }
}
