//! Shared Diesel error classification.
//!
//! Repositories translate each [`DieselFailure`] into their own port error.
//! Constraint violations keep the constraint name so callers can tell which
//! rule fired.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Unique constraint on `users.email`.
pub(super) const USERS_EMAIL_KEY: &str = "users_email_key";
/// Foreign key from `task_assignments.task_id` to `tasks.id`.
pub(super) const ASSIGNMENTS_TASK_FKEY: &str = "task_assignments_task_id_fkey";

/// Coarse category of a failed Diesel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DieselFailure {
    Connection(&'static str),
    Query(&'static str),
    UniqueViolation { constraint: Option<String> },
    ForeignKeyViolation { constraint: Option<String> },
}

/// Classify a Diesel error, logging the database detail at debug level.
pub(super) fn classify(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            },
            DatabaseErrorKind::ForeignKeyViolation => DieselFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            },
            DatabaseErrorKind::ClosedConnection => {
                DieselFailure::Connection("database connection error")
            }
            _ => DieselFailure::Query("database error"),
        },
        _ => DieselFailure::Query("database error"),
    }
}
