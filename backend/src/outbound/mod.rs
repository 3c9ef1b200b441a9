//! Outbound adapters implementing the persistence ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process store used when no database is configured.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
