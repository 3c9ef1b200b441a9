//! Driving port for task reads.

use async_trait::async_trait;

use crate::domain::{Task, TaskId, TeamTaskError, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQuery: Send + Sync {
    /// Fetch one task.
    async fn task(&self, task_id: TaskId) -> Result<Task, TeamTaskError>;

    /// Every task.
    async fn all_tasks(&self) -> Result<Vec<Task>, TeamTaskError>;

    /// Tasks the user is assigned to. The user must exist.
    async fn visible_tasks(&self, user_id: UserId) -> Result<Vec<Task>, TeamTaskError>;

    /// Tasks matching `status` and `priority`; an empty value matches any.
    async fn filter_tasks(&self, status: &str, priority: &str) -> Result<Vec<Task>, TeamTaskError>;
}
