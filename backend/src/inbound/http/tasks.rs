//! Task HTTP handlers.
//!
//! ```text
//! POST   /api/v1/tasks
//! GET    /api/v1/tasks
//! GET    /api/v1/tasks/filter?status=Open&priority=High
//! GET    /api/v1/tasks/{taskId}
//! PUT    /api/v1/tasks/{taskId}
//! DELETE /api/v1/tasks/{taskId}
//! POST   /api/v1/tasks/{taskId}/members/{userId}
//! ```
//!
//! `filter_tasks` must be registered before `get_task` so that `filter` is
//! not captured as a task identifier.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Task, TaskChanges, TaskDraft, TaskId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/tasks`.
///
/// Omitted fields default to empty, so a missing title is reported by the
/// service rather than the JSON extractor.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[schema(example = "Write release notes")]
    pub title: String,
    #[schema(example = "Summarise the changes since 1.2")]
    pub description: String,
    /// `High`, `Medium`, `Low`, or empty or `null` for none.
    #[schema(example = "High")]
    pub priority: Option<String>,
    #[schema(example = "Open")]
    pub status: String,
    /// Users to assign, in order.
    pub team_members: Vec<UserId>,
}

impl From<CreateTaskRequest> for TaskDraft {
    fn from(value: CreateTaskRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            priority: value.priority.unwrap_or_default(),
            status: value.status,
            team_members: value.team_members,
        }
    }
}

/// Request body for `PUT /api/v1/tasks/{taskId}`. Absent fields are left
/// unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// An empty string or `null` clears the priority.
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub priority: Option<Option<String>>,
    pub status: Option<String>,
}

/// Map a present field to `Some`, so an explicit `null` differs from an
/// omitted one.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(value: UpdateTaskRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            priority: value.priority.map(Option::unwrap_or_default),
            status: value.status,
        }
    }
}

/// Identifier of a newly created resource.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Query string for `GET /api/v1/tasks/filter`. Missing values match any.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    pub status: String,
    pub priority: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskPath {
    task_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberPath {
    task_id: i64,
    user_id: i64,
}

/// Create a task and assign its members.
///
/// If an assignment fails after the task row was written, the error body
/// carries `details.taskId` so the client can clean up or retry.
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Member not found", body = Error),
        (status = 409, description = "Member listed twice", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<HttpResponse> {
    let id = state
        .tasks
        .create_task(TaskDraft::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(CreatedResponse { id: id.get() }))
}

/// List every task.
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "All tasks", body = [Task]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Task>>> {
    Ok(web::Json(state.tasks_query.all_tasks().await?))
}

/// Tasks matching a status and priority. Matching is exact and
/// case-sensitive.
#[utoipa::path(
    get,
    path = "/api/v1/tasks/filter",
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching tasks", body = [Task]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "filterTasks"
)]
#[get("/tasks/filter")]
pub async fn filter_tasks(
    state: web::Data<HttpState>,
    query: web::Query<FilterQuery>,
) -> ApiResult<web::Json<Vec<Task>>> {
    let FilterQuery { status, priority } = query.into_inner();
    Ok(web::Json(state.tasks_query.filter_tasks(&status, &priority).await?))
}

/// Fetch one task with its members.
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{taskId}",
    params(("taskId" = i64, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task", body = Task),
        (status = 404, description = "Task not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "getTask"
)]
#[get("/tasks/{taskId}")]
pub async fn get_task(
    state: web::Data<HttpState>,
    path: web::Path<TaskPath>,
) -> ApiResult<web::Json<Task>> {
    let task = state.tasks_query.task(TaskId::new(path.task_id)).await?;
    Ok(web::Json(task))
}

/// Change the provided fields of a task.
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{taskId}",
    params(("taskId" = i64, Path, description = "Task identifier")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 204, description = "Task updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Task not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[put("/tasks/{taskId}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    path: web::Path<TaskPath>,
    payload: web::Json<UpdateTaskRequest>,
) -> ApiResult<HttpResponse> {
    state
        .tasks
        .edit_task(
            TaskId::new(path.task_id),
            TaskChanges::from(payload.into_inner()),
        )
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a task and its assignments.
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{taskId}",
    params(("taskId" = i64, Path, description = "Task identifier")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{taskId}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    path: web::Path<TaskPath>,
) -> ApiResult<HttpResponse> {
    state.tasks.delete_task(TaskId::new(path.task_id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Assign an existing user to an existing task.
#[utoipa::path(
    post,
    path = "/api/v1/tasks/{taskId}/members/{userId}",
    params(
        ("taskId" = i64, Path, description = "Task identifier"),
        ("userId" = i64, Path, description = "User identifier")
    ),
    responses(
        (status = 204, description = "User assigned"),
        (status = 404, description = "Task or user not found", body = Error),
        (status = 409, description = "Already assigned", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "assignMember"
)]
#[post("/tasks/{taskId}/members/{userId}")]
pub async fn assign_member(
    state: web::Data<HttpState>,
    path: web::Path<MemberPath>,
) -> ApiResult<HttpResponse> {
    state
        .tasks
        .assign_member(TaskId::new(path.task_id), UserId::new(path.user_id))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
