//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::TeamTaskService;
use crate::domain::ports::{
    TaskCommand, TaskQuery, TaskRepository, UserCommand, UserQuery, UserRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tasks: Arc<dyn TaskCommand>,
    pub tasks_query: Arc<dyn TaskQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
}

impl HttpState {
    /// Construct state from individual port implementations.
    pub fn new(
        tasks: Arc<dyn TaskCommand>,
        tasks_query: Arc<dyn TaskQuery>,
        users: Arc<dyn UserCommand>,
        users_query: Arc<dyn UserQuery>,
    ) -> Self {
        Self {
            tasks,
            tasks_query,
            users,
            users_query,
        }
    }

    /// Serve every port from one [`TeamTaskService`].
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use teamtask::domain::TeamTaskService;
    /// use teamtask::inbound::http::state::HttpState;
    /// use teamtask::outbound::memory::InMemoryTeamTaskStore;
    ///
    /// let store = Arc::new(InMemoryTeamTaskStore::new());
    /// let state = HttpState::from_service(TeamTaskService::new(store.clone(), store));
    /// let _query = state.tasks_query.clone();
    /// ```
    pub fn from_service<T, U>(service: TeamTaskService<T, U>) -> Self
    where
        T: TaskRepository + 'static,
        U: UserRepository + 'static,
    {
        let service = Arc::new(service);
        Self::new(service.clone(), service.clone(), service.clone(), service)
    }
}
