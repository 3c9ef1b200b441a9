//! Error taxonomy for task and user use-cases.
//!
//! Callers branch on [`TeamTaskError::kind`] instead of matching message text.
//! Storage failures keep the adapter error as their `source()`.

use std::fmt;

use thiserror::Error;

use super::ports::{TaskPersistenceError, UserPersistenceError};
use super::{TaskId, TaskValidationError, UserId};

/// Entity referenced by a [`TeamTaskError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Task,
    User,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Task => "task",
            Self::User => "user",
        })
    }
}

/// Fieldless classification of a [`TeamTaskError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    DuplicateEmail,
    NotFound,
    DuplicateAssignment,
    StorageFailure,
}

/// Adapter error wrapped by [`TeamTaskError::StorageFailure`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageCause {
    #[error(transparent)]
    Tasks(#[from] TaskPersistenceError),
    #[error(transparent)]
    Users(#[from] UserPersistenceError),
}

impl StorageCause {
    /// Whether the adapter could not reach its backing store at all.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(
            self,
            Self::Tasks(TaskPersistenceError::Connection { .. })
                | Self::Users(UserPersistenceError::Connection { .. })
        )
    }
}

/// Failure of a task or user use-case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamTaskError {
    #[error("invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },
    #[error("email {email} is already registered")]
    DuplicateEmail { email: String },
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },
    #[error("user {user_id} is already assigned to task {task_id}")]
    DuplicateAssignment { task_id: TaskId, user_id: UserId },
    #[error("{context}: {source}")]
    StorageFailure {
        context: String,
        #[source]
        source: StorageCause,
    },
}

impl TeamTaskError {
    /// Classification callers branch on.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::DuplicateEmail { .. } => ErrorKind::DuplicateEmail,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateAssignment { .. } => ErrorKind::DuplicateAssignment,
            Self::StorageFailure { .. } => ErrorKind::StorageFailure,
        }
    }

    /// Build an [`ErrorKind::InvalidInput`] error.
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Task `id` does not exist.
    #[must_use]
    pub const fn task_not_found(id: TaskId) -> Self {
        Self::NotFound {
            entity: Entity::Task,
            id: id.get(),
        }
    }

    /// User `id` does not exist.
    #[must_use]
    pub const fn user_not_found(id: UserId) -> Self {
        Self::NotFound {
            entity: Entity::User,
            id: id.get(),
        }
    }

    /// Translate a task adapter error, keeping constraint signals as kinds.
    pub fn from_tasks(context: impl Into<String>, error: TaskPersistenceError) -> Self {
        match error {
            TaskPersistenceError::DuplicateAssignment { task_id, user_id } => {
                Self::DuplicateAssignment { task_id, user_id }
            }
            TaskPersistenceError::MissingTask { task_id } => Self::task_not_found(task_id),
            TaskPersistenceError::MissingUser { user_id } => Self::user_not_found(user_id),
            other => Self::StorageFailure {
                context: context.into(),
                source: other.into(),
            },
        }
    }

    /// Translate a user adapter error, keeping constraint signals as kinds.
    pub fn from_users(context: impl Into<String>, error: UserPersistenceError) -> Self {
        match error {
            UserPersistenceError::DuplicateEmail { email } => Self::DuplicateEmail { email },
            other => Self::StorageFailure {
                context: context.into(),
                source: other.into(),
            },
        }
    }
}

impl From<TaskValidationError> for TeamTaskError {
    fn from(error: TaskValidationError) -> Self {
        Self::invalid_input(error.field(), error.to_string())
    }
}

/// Task creation failure.
///
/// When the task row was written but assigning a member failed, the task is
/// kept and [`CreateTaskError::task_id`] reports it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source}")]
pub struct CreateTaskError {
    task_id: Option<TaskId>,
    source: TeamTaskError,
}

impl CreateTaskError {
    /// Nothing was written.
    #[must_use]
    pub const fn rejected(source: TeamTaskError) -> Self {
        Self {
            task_id: None,
            source,
        }
    }

    /// The task exists but an assignment failed.
    #[must_use]
    pub const fn partially_assigned(task_id: TaskId, source: TeamTaskError) -> Self {
        Self {
            task_id: Some(task_id),
            source,
        }
    }

    /// Identifier of the task that was created despite the failure.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// The underlying use-case error.
    #[must_use]
    pub const fn error(&self) -> &TeamTaskError {
        &self.source
    }

    /// Shorthand for `self.error().kind()`.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

impl From<TeamTaskError> for CreateTaskError {
    fn from(source: TeamTaskError) -> Self {
        Self::rejected(source)
    }
}
