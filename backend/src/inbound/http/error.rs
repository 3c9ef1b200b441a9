//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the use-case errors HTTP-agnostic while letting Actix
//! handlers turn them into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{CreateTaskError, Error, ErrorCode, TRACE_ID_HEADER, TeamTaskError};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// JSON extractor configuration rendering body errors as [`Error`] payloads.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("invalid JSON body: {err}");
        actix_web::Error::from(Error::invalid_request(message))
    })
}

impl From<TeamTaskError> for Error {
    fn from(err: TeamTaskError) -> Self {
        match &err {
            TeamTaskError::InvalidInput { field, message } => {
                Error::invalid_request(message.clone()).with_details(json!({ "field": field }))
            }
            TeamTaskError::NotFound { .. } => Error::not_found(err.to_string()),
            TeamTaskError::DuplicateEmail { .. } | TeamTaskError::DuplicateAssignment { .. } => {
                Error::conflict(err.to_string())
            }
            TeamTaskError::StorageFailure { source, .. } if source.is_connection() => {
                warn!(error = %err, "storage unreachable");
                Error::service_unavailable("storage is unavailable, retry later")
            }
            TeamTaskError::StorageFailure { .. } => {
                error!(error = %err, "storage failure");
                Error::internal(err.to_string())
            }
        }
    }
}

impl From<CreateTaskError> for Error {
    fn from(err: CreateTaskError) -> Self {
        let task_id = err.task_id();
        let mapped = Error::from(err.error().clone());
        match task_id {
            Some(task_id) => {
                let mut details = mapped.details().cloned().unwrap_or_else(|| json!({}));
                details["taskId"] = json!(task_id.get());
                mapped.with_details(details)
            }
            None => mapped,
        }
    }
}
