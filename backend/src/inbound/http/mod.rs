//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register the task and user endpoints on `cfg`.
///
/// Mount under `/api/v1`. Registration order matters: the literal
/// `/tasks/filter` route precedes `/tasks/{taskId}`. Malformed JSON bodies
/// are answered with the standard error payload.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use teamtask::inbound::http::configure;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .service(tasks::create_task)
        .service(tasks::list_tasks)
        .service(tasks::filter_tasks)
        .service(tasks::get_task)
        .service(tasks::update_task)
        .service(tasks::delete_task)
        .service(tasks::assign_member)
        .service(users::register_user)
        .service(users::get_user)
        .service(users::delete_user)
        .service(users::user_tasks);
}
