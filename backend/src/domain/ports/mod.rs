//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`TaskRepository`], [`UserRepository`]) are implemented by
//! outbound storage adapters. Driving ports ([`TaskCommand`], [`TaskQuery`],
//! [`UserCommand`], [`UserQuery`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod task_command;
mod task_query;
mod task_repository;
mod user_command;
mod user_query;
mod user_repository;

#[cfg(test)]
pub use task_command::MockTaskCommand;
pub use task_command::TaskCommand;
#[cfg(test)]
pub use task_query::MockTaskQuery;
pub use task_query::TaskQuery;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskPersistenceError, TaskRepository};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::UserCommand;
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
