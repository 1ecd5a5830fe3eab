//! User command and query handlers.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::ledger::{EntityKind, LedgerError, User};
use crate::ports::{LedgerReader, LedgerRepository};

/// Command to register a user.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: String,
}

pub struct CreateUserHandler {
    repository: Arc<dyn LedgerRepository>,
}

impl CreateUserHandler {
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateUserCommand) -> Result<User, LedgerError> {
        let user = User::new(UserId::new(), &cmd.name, Timestamp::now())?;
        self.repository.save_user(&user).await?;

        info!(user_id = %user.id(), "user created");
        Ok(user)
    }
}

/// Command to change a user's name.
#[derive(Debug, Clone)]
pub struct RenameUserCommand {
    pub user_id: UserId,
    pub name: String,
}

pub struct RenameUserHandler {
    reader: Arc<dyn LedgerReader>,
    repository: Arc<dyn LedgerRepository>,
}

impl RenameUserHandler {
    pub fn new(reader: Arc<dyn LedgerReader>, repository: Arc<dyn LedgerRepository>) -> Self {
        Self { reader, repository }
    }

    pub async fn handle(&self, cmd: RenameUserCommand) -> Result<User, LedgerError> {
        let mut user = self
            .reader
            .find_user(&cmd.user_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(EntityKind::User, cmd.user_id))?;

        user.rename(&cmd.name, Timestamp::now())?;
        self.repository.update_user(&user).await?;
        Ok(user)
    }
}

/// Command to remove a user with no points or rewards.
#[derive(Debug, Clone, Copy)]
pub struct DeleteUserCommand {
    pub user_id: UserId,
}

pub struct DeleteUserHandler {
    repository: Arc<dyn LedgerRepository>,
}

impl DeleteUserHandler {
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// - `NotFound` if the user does not exist
    /// - `Conflict` if points or rewards still reference the user
    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), LedgerError> {
        self.repository.delete_user(&cmd.user_id).await?;
        info!(user_id = %cmd.user_id, "user deleted");
        Ok(())
    }
}

/// Query for a single user.
#[derive(Debug, Clone, Copy)]
pub struct GetUserQuery {
    pub user_id: UserId,
}

pub struct GetUserHandler {
    reader: Arc<dyn LedgerReader>,
}

impl GetUserHandler {
    pub fn new(reader: Arc<dyn LedgerReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<User, LedgerError> {
        self.reader
            .find_user(&query.user_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(EntityKind::User, query.user_id))
    }
}
