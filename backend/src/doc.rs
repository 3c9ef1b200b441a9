//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every task, user and health endpoint together with
//! the request, response and error schemas they reference. Swagger UI serves
//! it in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Priority, Task, User};
use crate::inbound::http::tasks::{CreateTaskRequest, CreatedResponse, UpdateTaskRequest};
use crate::inbound::http::users::RegisterUserRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Team task API",
        description = "Create tasks, register users and assign users to tasks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::filter_tasks,
        crate::inbound::http::tasks::get_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::tasks::assign_member,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::user_tasks,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Task,
        Priority,
        User,
        Error,
        ErrorCode,
        CreateTaskRequest,
        UpdateTaskRequest,
        RegisterUserRequest,
        CreatedResponse
    )),
    tags(
        (name = "tasks", description = "Task lifecycle and membership"),
        (name = "users", description = "User registration and lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
