//! Shared helpers for the PostgreSQL-backed integration suites.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

mod cluster_skip;

pub use cluster_skip::handle_cluster_setup_failure;

/// Render a `postgres` error with its SQLSTATE, detail and hint.
///
/// `Display` on `postgres::Error` often collapses to `db error`, which hides
/// what actually went wrong.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}

/// Drop and recreate `name` so each suite starts from an empty schema.
///
/// Runs through the blocking `postgres` client on the maintenance database
/// because `DROP DATABASE` cannot run inside a transaction.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let describe = |err: postgres::Error| format_postgres_error(&err);
    let mut client = Client::connect(&admin_url, NoTls).map_err(describe)?;
    client
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\""))
        .map_err(describe)?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(describe)?;
    Ok(())
}
