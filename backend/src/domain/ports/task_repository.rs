//! Port abstraction for task persistence adapters and their errors.
//!
//! Tasks returned by adapters always carry their assigned member ids in
//! ascending order. Adapters enforce assignment uniqueness and referential
//! integrity; the service treats those signals as authoritative.

use async_trait::async_trait;

use crate::domain::{NewTask, Task, TaskId, TaskUpdate, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
        /// The (task, user) edge already exists.
        DuplicateAssignment { task_id: TaskId, user_id: UserId } =>
            "user {user_id} is already assigned to task {task_id}",
        /// The referenced task row does not exist.
        MissingTask { task_id: TaskId } => "task {task_id} does not exist",
        /// The referenced user row does not exist.
        MissingUser { user_id: UserId } => "user {user_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task and return the identifier storage assigned to it.
    async fn create(&self, task: &NewTask) -> Result<TaskId, TaskPersistenceError>;

    /// Record that `user_id` works on `task_id`.
    async fn assign_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> Result<(), TaskPersistenceError>;

    /// Fetch a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskPersistenceError>;

    /// Tasks the user is assigned to, ordered by task id.
    async fn find_for_user(&self, user_id: UserId) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Every task, ordered by task id.
    async fn list_all(&self) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Remove a task together with its assignment edges.
    async fn delete(&self, id: TaskId) -> Result<(), TaskPersistenceError>;

    /// Overwrite the fields present in `update`.
    async fn update(&self, id: TaskId, update: &TaskUpdate) -> Result<(), TaskPersistenceError>;
}
