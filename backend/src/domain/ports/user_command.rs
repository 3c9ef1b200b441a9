//! Driving port for user registration and removal.

use async_trait::async_trait;

use crate::domain::{NewUser, TeamTaskError, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register a user with a unique email.
    async fn register_user(&self, user: NewUser) -> Result<UserId, TeamTaskError>;

    /// Remove a user and their assignments.
    async fn delete_user(&self, user_id: UserId) -> Result<(), TeamTaskError>;
}
