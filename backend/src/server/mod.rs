//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use teamtask::Trace;
#[cfg(debug_assertions)]
use teamtask::doc::ApiDoc;
use teamtask::domain::TeamTaskService;
use teamtask::inbound::http::configure;
use teamtask::inbound::http::health::{HealthState, live, ready};
use teamtask::inbound::http::state::HttpState;
use teamtask::outbound::memory::InMemoryTeamTaskStore;
use teamtask::outbound::persistence::{DbPool, DieselTaskRepository, DieselUserRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the use-case service over PostgreSQL when a pool is configured,
/// otherwise over a fresh in-memory store.
fn build_http_state(db_pool: Option<DbPool>) -> HttpState {
    match db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            HttpState::from_service(TeamTaskService::new(
                Arc::new(DieselTaskRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool)),
            ))
        }
        None => {
            info!("no database configured, using in-memory storage");
            let store = Arc::new(InMemoryTeamTaskStore::new());
            HttpState::from_service(TeamTaskService::new(store.clone(), store))
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, db_pool } = config;
    let http_state = web::Data::new(build_http_state(db_pool));
    let app_health = health_state.clone();

    let server = HttpServer::new(move || build_app(app_health.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness checks, then stop the server once in-flight requests finish.
pub async fn shut_down(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining connections before shutdown");
    handle.stop(true).await;
}
