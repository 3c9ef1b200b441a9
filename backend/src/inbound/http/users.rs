//! User HTTP handlers.
//!
//! ```text
//! POST   /api/v1/users {"name":"Ann","email":"ann@example.com","password":"pw"}
//! GET    /api/v1/users/{userId}
//! DELETE /api/v1/users/{userId}
//! GET    /api/v1/users/{userId}/tasks
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, Task, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tasks::CreatedResponse;

/// Registration body for `POST /api/v1/users`.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl From<RegisterUserRequest> for NewUser {
    fn from(value: RegisterUserRequest) -> Self {
        Self::new(value.name, value.email, value.password)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserPath {
    user_id: i64,
}

/// Register a user. Emails are unique.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let id = state
        .users
        .register_user(NewUser::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(CreatedResponse { id: id.get() }))
}

/// Fetch a user. The password is never included.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}",
    params(("userId" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{userId}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<User>> {
    let user = state.users_query.user(UserId::new(path.user_id)).await?;
    Ok(web::Json(user))
}

/// Delete a user and unassign them from every task.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{userId}",
    params(("userId" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{userId}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
) -> ApiResult<HttpResponse> {
    state.users.delete_user(UserId::new(path.user_id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Tasks the user is assigned to.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/tasks",
    params(("userId" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Assigned tasks", body = [Task]),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUserTasks"
)]
#[get("/users/{userId}/tasks")]
pub async fn user_tasks(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<Vec<Task>>> {
    let tasks = state
        .tasks_query
        .visible_tasks(UserId::new(path.user_id))
        .await?;
    Ok(web::Json(tasks))
}
