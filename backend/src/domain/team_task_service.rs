//! Task and user use-cases.
//!
//! [`TeamTaskService`] validates input, checks that referenced rows exist and
//! delegates to the repositories. Existence checks run before each mutation
//! but are not transactional; the adapters' uniqueness and foreign-key
//! signals are what finally decide duplicate and dangling writes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    TaskCommand, TaskPersistenceError, TaskQuery, TaskRepository, UserCommand,
    UserPersistenceError, UserQuery, UserRepository,
};
use crate::domain::{
    CreateTaskError, NewUser, Task, TaskChanges, TaskDraft, TaskId, TeamTaskError, User, UserId,
};

/// Service implementing every task and user driving port.
#[derive(Clone)]
pub struct TeamTaskService<T, U> {
    tasks: Arc<T>,
    users: Arc<U>,
}

impl<T, U> TeamTaskService<T, U> {
    /// Create a service over the given repositories.
    pub fn new(tasks: Arc<T>, users: Arc<U>) -> Self {
        Self { tasks, users }
    }
}

impl<T, U> TeamTaskService<T, U>
where
    T: TaskRepository,
    U: UserRepository,
{
    fn task_storage(context: &str, error: TaskPersistenceError) -> TeamTaskError {
        debug!(%error, context, "task repository call failed");
        TeamTaskError::from_tasks(context, error)
    }

    fn user_storage(context: &str, error: UserPersistenceError) -> TeamTaskError {
        debug!(%error, context, "user repository call failed");
        TeamTaskError::from_users(context, error)
    }

    async fn require_task(&self, task_id: TaskId) -> Result<Task, TeamTaskError> {
        self.tasks
            .find_by_id(task_id)
            .await
            .map_err(|err| Self::task_storage("failed to load task", err))?
            .ok_or_else(|| TeamTaskError::task_not_found(task_id))
    }

    async fn require_user(&self, user_id: UserId) -> Result<User, TeamTaskError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|err| Self::user_storage("failed to load user", err))?
            .ok_or_else(|| TeamTaskError::user_not_found(user_id))
    }

    /// Assign a user to a task already known to exist.
    async fn link(&self, task_id: TaskId, user_id: UserId) -> Result<(), TeamTaskError> {
        self.require_user(user_id).await?;
        self.tasks
            .assign_user(task_id, user_id)
            .await
            .map_err(|err| Self::task_storage("failed to assign user to task", err))
    }
}

#[async_trait]
impl<T, U> TaskCommand for TeamTaskService<T, U>
where
    T: TaskRepository,
    U: UserRepository,
{
    async fn create_task(&self, draft: TaskDraft) -> Result<TaskId, CreateTaskError> {
        let new_task = draft.validate().map_err(TeamTaskError::from)?;
        let task_id = self
            .tasks
            .create(&new_task)
            .await
            .map_err(|err| Self::task_storage("failed to create task", err))?;
        info!(%task_id, "task created");

        for &user_id in &draft.team_members {
            if let Err(error) = self.link(task_id, user_id).await {
                warn!(%task_id, %user_id, %error, "task created but member assignment failed");
                return Err(CreateTaskError::partially_assigned(task_id, error));
            }
        }
        Ok(task_id)
    }

    async fn assign_member(&self, task_id: TaskId, user_id: UserId) -> Result<(), TeamTaskError> {
        self.require_task(task_id).await?;
        self.link(task_id, user_id).await?;
        info!(%task_id, %user_id, "member assigned to task");
        Ok(())
    }

    async fn edit_task(&self, task_id: TaskId, changes: TaskChanges) -> Result<(), TeamTaskError> {
        self.require_task(task_id).await?;
        let update = changes.validate()?;
        if update.is_empty() {
            return Ok(());
        }
        self.tasks
            .update(task_id, &update)
            .await
            .map_err(|err| Self::task_storage("failed to update task", err))?;
        info!(%task_id, "task updated");
        Ok(())
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), TeamTaskError> {
        self.require_task(task_id).await?;
        self.tasks
            .delete(task_id)
            .await
            .map_err(|err| Self::task_storage("failed to delete task", err))?;
        info!(%task_id, "task deleted");
        Ok(())
    }
}

#[async_trait]
impl<T, U> TaskQuery for TeamTaskService<T, U>
where
    T: TaskRepository,
    U: UserRepository,
{
    async fn task(&self, task_id: TaskId) -> Result<Task, TeamTaskError> {
        self.require_task(task_id).await
    }

    async fn all_tasks(&self) -> Result<Vec<Task>, TeamTaskError> {
        self.tasks
            .list_all()
            .await
            .map_err(|err| Self::task_storage("failed to list tasks", err))
    }

    async fn visible_tasks(&self, user_id: UserId) -> Result<Vec<Task>, TeamTaskError> {
        self.require_user(user_id).await?;
        self.tasks
            .find_for_user(user_id)
            .await
            .map_err(|err| Self::task_storage("failed to list tasks for user", err))
    }

    async fn filter_tasks(&self, status: &str, priority: &str) -> Result<Vec<Task>, TeamTaskError> {
        let mut tasks = self.all_tasks().await?;
        tasks.retain(|task| task.matches(status, priority));
        Ok(tasks)
    }
}

#[async_trait]
impl<T, U> UserCommand for TeamTaskService<T, U>
where
    T: TaskRepository,
    U: UserRepository,
{
    async fn register_user(&self, user: NewUser) -> Result<UserId, TeamTaskError> {
        let existing = self
            .users
            .find_by_email(&user.email)
            .await
            .map_err(|err| Self::user_storage("failed to look up email", err))?;
        if existing.is_some() {
            return Err(TeamTaskError::DuplicateEmail { email: user.email });
        }
        if let Some(field) = user.first_empty_field() {
            return Err(TeamTaskError::invalid_input(
                field,
                format!("{field} must not be empty"),
            ));
        }

        let user_id = self
            .users
            .add(&user)
            .await
            .map_err(|err| Self::user_storage("failed to add user", err))?;
        info!(%user_id, "user registered");
        Ok(user_id)
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), TeamTaskError> {
        self.require_user(user_id).await?;
        self.users
            .remove(user_id)
            .await
            .map_err(|err| Self::user_storage("failed to remove user", err))?;
        info!(%user_id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<T, U> UserQuery for TeamTaskService<T, U>
where
    T: TaskRepository,
    U: UserRepository,
{
    async fn user(&self, user_id: UserId) -> Result<User, TeamTaskError> {
        self.require_user(user_id).await
    }
}

#[cfg(test)]
#[path = "team_task_service_tests.rs"]
mod tests;
