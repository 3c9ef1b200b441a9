//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{TeamTaskError, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch one user.
    async fn user(&self, user_id: UserId) -> Result<User, TeamTaskError>;
}
