//! Thread-safe in-memory storage adapter.
//!
//! [`InMemoryTeamTaskStore`] implements both persistence ports over one shared
//! state so assignment edges can enforce the same referential rules as the
//! PostgreSQL schema. The server falls back to it when no database URL is
//! configured, and tests use it to exercise the service end to end.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    TaskPersistenceError, TaskRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{NewTask, NewUser, Task, TaskId, TaskUpdate, User, UserId};

/// In-memory task, user and assignment tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamTaskStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    last_task_id: i64,
    last_user_id: i64,
    tasks: BTreeMap<TaskId, Task>,
    users: BTreeMap<UserId, User>,
    assignments: BTreeSet<(TaskId, UserId)>,
}

impl StoreState {
    fn with_members(&self, task: &Task) -> Task {
        let mut hydrated = task.clone();
        let edges = (task.id, UserId::new(i64::MIN))..=(task.id, UserId::new(i64::MAX));
        hydrated.team_members = self
            .assignments
            .range(edges)
            .map(|&(_, user_id)| user_id)
            .collect();
        hydrated
    }

    fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.email == email)
    }
}

impl InMemoryTeamTaskStore {
    /// Creates an empty store. Identifiers start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, String> {
        self.state.read().map_err(|err| err.to_string())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, String> {
        self.state.write().map_err(|err| err.to_string())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTeamTaskStore {
    async fn create(&self, task: &NewTask) -> Result<TaskId, TaskPersistenceError> {
        let mut state = self.write().map_err(TaskPersistenceError::query)?;
        state.last_task_id += 1;
        let id = TaskId::new(state.last_task_id);
        state.tasks.insert(
            id,
            Task {
                id,
                title: task.title.clone(),
                description: task.description.clone(),
                priority: task.priority,
                status: task.status.clone(),
                team_members: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn assign_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> Result<(), TaskPersistenceError> {
        let mut state = self.write().map_err(TaskPersistenceError::query)?;
        if !state.tasks.contains_key(&task_id) {
            return Err(TaskPersistenceError::missing_task(task_id));
        }
        if !state.users.contains_key(&user_id) {
            return Err(TaskPersistenceError::missing_user(user_id));
        }
        if !state.assignments.insert((task_id, user_id)) {
            return Err(TaskPersistenceError::duplicate_assignment(task_id, user_id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let state = self.read().map_err(TaskPersistenceError::query)?;
        Ok(state.tasks.get(&id).map(|task| state.with_members(task)))
    }

    async fn find_for_user(&self, user_id: UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let state = self.read().map_err(TaskPersistenceError::query)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| state.assignments.contains(&(task.id, user_id)))
            .map(|task| state.with_members(task))
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let state = self.read().map_err(TaskPersistenceError::query)?;
        Ok(state
            .tasks
            .values()
            .map(|task| state.with_members(task))
            .collect())
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskPersistenceError> {
        let mut state = self.write().map_err(TaskPersistenceError::query)?;
        state.assignments.retain(|&(task_id, _)| task_id != id);
        state.tasks.remove(&id);
        Ok(())
    }

    async fn update(&self, id: TaskId, update: &TaskUpdate) -> Result<(), TaskPersistenceError> {
        let mut state = self.write().map_err(TaskPersistenceError::query)?;
        if let Some(task) = state.tasks.get_mut(&id) {
            update.apply_to(task);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryTeamTaskStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let state = self.read().map_err(UserPersistenceError::query)?;
        Ok(state.user_by_email(email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.read().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn add(&self, user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let mut state = self.write().map_err(UserPersistenceError::query)?;
        if state.user_by_email(&user.email).is_some() {
            return Err(UserPersistenceError::duplicate_email(user.email.clone()));
        }
        state.last_user_id += 1;
        let id = UserId::new(state.last_user_id);
        state.users.insert(
            id,
            User {
                id,
                name: user.name.clone(),
                email: user.email.clone(),
                password: user.password.clone(),
            },
        );
        Ok(id)
    }

    async fn remove(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut state = self.write().map_err(UserPersistenceError::query)?;
        state.assignments.retain(|&(_, user_id)| user_id != id);
        state.users.remove(&id);
        Ok(())
    }
}
