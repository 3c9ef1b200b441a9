//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain values and map
//! database failures onto the port error enums. They contain no business
//! rules; uniqueness and referential integrity come from the schema in
//! `backend/migrations`.
//!
//! # Example
//!
//! ```no_run
//! use teamtask::outbound::persistence::{DbPool, DieselTaskRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/teamtask")).await?;
//! let tasks = DieselTaskRepository::new(pool);
//! # let _ = tasks;
//! # Ok(())
//! # }
//! ```

mod diesel_task_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
