//! Driving port for task mutations.
//!
//! HTTP handlers depend on this trait rather than on the concrete service so
//! they stay testable without storage.

use async_trait::async_trait;

use crate::domain::{CreateTaskError, TaskChanges, TaskDraft, TaskId, TeamTaskError, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCommand: Send + Sync {
    /// Create a task and assign the listed members in order.
    ///
    /// # Errors
    ///
    /// A failed assignment leaves the task in place; the returned
    /// [`CreateTaskError::task_id`] then names it.
    async fn create_task(&self, draft: TaskDraft) -> Result<TaskId, CreateTaskError>;

    /// Assign an existing user to an existing task.
    async fn assign_member(&self, task_id: TaskId, user_id: UserId) -> Result<(), TeamTaskError>;

    /// Apply a partial edit to a task.
    async fn edit_task(&self, task_id: TaskId, changes: TaskChanges) -> Result<(), TeamTaskError>;

    /// Delete a task and its assignments.
    async fn delete_task(&self, task_id: TaskId) -> Result<(), TeamTaskError>;
}
