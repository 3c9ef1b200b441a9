//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};

use crate::domain::ports::{MockTaskCommand, MockTaskQuery, MockUserCommand, MockUserQuery};
use crate::domain::{Priority, Task, TaskId, UserId};
use crate::inbound::http::state::HttpState;

/// Mocked driving ports. Any call without a matching expectation panics.
#[derive(Default)]
pub struct PortMocks {
    pub tasks: MockTaskCommand,
    pub tasks_query: MockTaskQuery,
    pub users: MockUserCommand,
    pub users_query: MockUserQuery,
}

impl PortMocks {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.tasks),
            Arc::new(self.tasks_query),
            Arc::new(self.users),
            Arc::new(self.users_query),
        )
    }
}

/// Build the `/api/v1` routes over `mocks` and initialise the service.
pub async fn init_api(
    mocks: PortMocks,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(mocks.into_state()))
            .service(web::scope("/api/v1").configure(super::configure)),
    )
    .await
}

/// A task as storage would return it.
pub fn sample_task(id: i64, members: &[i64]) -> Task {
    Task {
        id: TaskId::new(id),
        title: format!("Task {id}"),
        description: "D".into(),
        priority: Some(Priority::High),
        status: "Open".into(),
        team_members: members.iter().copied().map(UserId::new).collect(),
    }
}
