//! Domain primitives, use-case errors and the task service.
//!
//! Purpose: hold every business rule of the system. Adapters on either side
//! talk to this module through the traits in [`ports`].
//!
//! Public surface:
//! - Task, TaskId, Priority and the task input shapes.
//! - User, UserId, NewUser.
//! - TeamTaskError, ErrorKind, CreateTaskError: use-case failures.
//! - Error, ErrorCode: transport-facing error payload.
//! - TeamTaskService: implementation of the driving ports.

pub mod error;
pub mod ports;
pub mod task;
pub mod team_task_error;
pub mod team_task_service;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::task::{
    NewTask, ParsePriorityError, Priority, Task, TaskChanges, TaskDraft, TaskId, TaskUpdate,
    TaskValidationError,
};
pub use self::team_task_error::{CreateTaskError, Entity, ErrorKind, StorageCause, TeamTaskError};
pub use self::team_task_service::TeamTaskService;
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, User, UserId};
