//! PostgreSQL-backed `TaskRepository` using Diesel.
//!
//! Tasks are read in two queries: the task rows, then their membership edges
//! ordered by `(task_id, user_id)`, which gives each task its members in
//! ascending order.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{NewTask, Priority, Task, TaskId, TaskUpdate, UserId};

use super::error_mapping::{ASSIGNMENTS_TASK_FKEY, DieselFailure, classify};
use super::models::{AssignmentRow, NewTaskRow, TaskChangeset, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::{task_assignments, tasks};

/// Diesel-backed implementation of the `TaskRepository` port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    TaskPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> TaskPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => TaskPersistenceError::connection(message),
        DieselFailure::Query(message) => TaskPersistenceError::query(message),
        DieselFailure::UniqueViolation { .. } => {
            TaskPersistenceError::query("unexpected unique violation")
        }
        DieselFailure::ForeignKeyViolation { .. } => {
            TaskPersistenceError::query("unexpected foreign key violation")
        }
    }
}

fn map_assignment_error(
    error: diesel::result::Error,
    task_id: TaskId,
    user_id: UserId,
) -> TaskPersistenceError {
    match classify(error) {
        DieselFailure::UniqueViolation { .. } => {
            TaskPersistenceError::duplicate_assignment(task_id, user_id)
        }
        DieselFailure::ForeignKeyViolation { constraint }
            if constraint.as_deref() == Some(ASSIGNMENTS_TASK_FKEY) =>
        {
            TaskPersistenceError::missing_task(task_id)
        }
        DieselFailure::ForeignKeyViolation { .. } => TaskPersistenceError::missing_user(user_id),
        DieselFailure::Connection(message) => TaskPersistenceError::connection(message),
        DieselFailure::Query(message) => TaskPersistenceError::query(message),
    }
}

fn parse_priority(task_id: i64, raw: Option<String>) -> Option<Priority> {
    let raw = raw?;
    match raw.parse() {
        Ok(priority) => Some(priority),
        Err(error) => {
            warn!(task_id, %error, "unrecognised priority in tasks row, treating as unset");
            None
        }
    }
}

fn row_to_task(row: TaskRow, team_members: Vec<UserId>) -> Task {
    Task {
        id: TaskId::new(row.id),
        title: row.title,
        description: row.description,
        priority: parse_priority(row.id, row.priority),
        status: row.status,
        team_members,
    }
}

/// Attach membership edges to already loaded task rows.
async fn with_members(
    conn: &mut AsyncPgConnection,
    rows: Vec<TaskRow>,
) -> Result<Vec<Task>, diesel::result::Error> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let edges: Vec<AssignmentRow> = task_assignments::table
        .filter(task_assignments::task_id.eq_any(ids))
        .order((task_assignments::task_id, task_assignments::user_id))
        .select(AssignmentRow::as_select())
        .load(conn)
        .await?;

    let mut members: HashMap<i64, Vec<UserId>> = HashMap::new();
    for edge in edges {
        members
            .entry(edge.task_id)
            .or_default()
            .push(UserId::new(edge.user_id));
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let team = members.remove(&row.id).unwrap_or_default();
            row_to_task(row, team)
        })
        .collect())
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<TaskId, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTaskRow {
            title: &task.title,
            description: &task.description,
            priority: task.priority.map(Priority::as_str),
            status: &task.status,
        };

        let id: i64 = diesel::insert_into(tasks::table)
            .values(&row)
            .returning(tasks::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(TaskId::new(id))
    }

    async fn assign_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let edge = AssignmentRow {
            task_id: task_id.get(),
            user_id: user_id.get(),
        };

        diesel::insert_into(task_assignments::table)
            .values(&edge)
            .execute(&mut conn)
            .await
            .map_err(|err| map_assignment_error(err, task_id, user_id))?;
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TaskRow> = tasks::table
            .find(id.get())
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut loaded = with_members(&mut conn, vec![row])
            .await
            .map_err(map_diesel_error)?;
        Ok(loaded.pop())
    }

    async fn find_for_user(&self, user_id: UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .inner_join(task_assignments::table)
            .filter(task_assignments::user_id.eq(user_id.get()))
            .order(tasks::id)
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        with_members(&mut conn, rows)
            .await
            .map_err(map_diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .order(tasks::id)
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        with_members(&mut conn, rows)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let task_id = id.get();

        // Edges first so a failure cannot leave orphaned assignments behind.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::delete(
                    task_assignments::table.filter(task_assignments::task_id.eq(task_id)),
                )
                .execute(conn)
                .await?;
                diesel::delete(tasks::table.find(task_id))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(&self, id: TaskId, update: &TaskUpdate) -> Result<(), TaskPersistenceError> {
        if update.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = TaskChangeset {
            title: update.title.as_deref(),
            description: update.description.as_deref(),
            priority: update.priority.map(|priority| priority.map(Priority::as_str)),
            status: update.status.as_deref(),
        };

        diesel::update(tasks::table.find(id.get()))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
