//! Task data model and input validation.
//!
//! Inputs arrive as loosely typed drafts ([`TaskDraft`], [`TaskChanges`]) and
//! are validated into the shapes the persistence ports accept ([`NewTask`],
//! [`TaskUpdate`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::UserId;

/// Storage-assigned task identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct TaskId(i64);

impl TaskId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed priority scale. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Canonical spelling, as stored and serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parse an optional priority where the empty string means unset.
    ///
    /// # Examples
    /// ```
    /// use teamtask::domain::Priority;
    ///
    /// assert_eq!(Priority::parse_optional(""), Ok(None));
    /// assert_eq!(Priority::parse_optional("Low"), Ok(Some(Priority::Low)));
    /// assert!(Priority::parse_optional("low").is_err());
    /// ```
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, ParsePriorityError> {
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not one of `High`, `Medium` or `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("priority must be one of High, Medium or Low, got {value:?}")]
pub struct ParsePriorityError {
    pub value: String,
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            other => Err(ParsePriorityError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Persisted task with its assigned members in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[schema(example = "Write release notes")]
    pub title: String,
    #[schema(example = "Summarise the changes since 1.2")]
    pub description: String,
    pub priority: Option<Priority>,
    #[schema(example = "Open")]
    pub status: String,
    pub team_members: Vec<UserId>,
}

impl Task {
    /// Whether the task passes a status/priority filter.
    ///
    /// An empty filter value matches anything. Non-empty values compare
    /// verbatim, so an unrecognised priority simply matches nothing.
    ///
    /// # Examples
    /// ```
    /// use teamtask::domain::{Priority, Task, TaskId};
    ///
    /// let task = Task {
    ///     id: TaskId::new(1),
    ///     title: "Task 1".into(),
    ///     description: "D".into(),
    ///     priority: Some(Priority::High),
    ///     status: "Open".into(),
    ///     team_members: vec![],
    /// };
    /// assert!(task.matches("Open", "High"));
    /// assert!(task.matches("", ""));
    /// assert!(!task.matches("Closed", "High"));
    /// ```
    #[must_use]
    pub fn matches(&self, status: &str, priority: &str) -> bool {
        let status_ok = status.is_empty() || self.status == status;
        let priority_ok =
            priority.is_empty() || self.priority.map_or("", Priority::as_str) == priority;
        status_ok && priority_ok
    }
}

/// Validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("description must not be empty")]
    EmptyDescription,
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),
}

impl TaskValidationError {
    /// Name of the offending input field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyDescription => "description",
            Self::InvalidPriority(_) => "priority",
        }
    }
}

/// Unvalidated task creation request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub team_members: Vec<UserId>,
}

impl TaskDraft {
    /// Check required fields and the priority, in that order.
    pub fn validate(&self) -> Result<NewTask, TaskValidationError> {
        if self.title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        let priority = Priority::parse_optional(&self.priority)?;
        Ok(NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            priority,
            status: self.status.clone(),
        })
    }
}

/// Validated task row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub status: String,
}

/// Unvalidated partial edit.
///
/// `None` leaves a field untouched. `Some("")` clears priority or status;
/// title and description cannot be cleared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl TaskChanges {
    /// Validate the provided fields.
    pub fn validate(&self) -> Result<TaskUpdate, TaskValidationError> {
        if self.title.as_deref() == Some("") {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.description.as_deref() == Some("") {
            return Err(TaskValidationError::EmptyDescription);
        }
        let priority = self
            .priority
            .as_deref()
            .map(Priority::parse_optional)
            .transpose()?;
        Ok(TaskUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
            priority,
            status: self.status.clone(),
        })
    }
}

/// Validated partial update. `priority: Some(None)` clears the priority.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Option<Priority>>,
    pub status: Option<String>,
}

impl TaskUpdate {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Overwrite the provided fields of `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description.clone_from(description);
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = &self.status {
            task.status.clone_from(status);
        }
    }
}
