//! HTTP server configuration object and helpers.

use teamtask::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration binding `host:port` with in-memory storage.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            bind_addr: (host.into(), port),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, tasks and users are stored in PostgreSQL instead of
    /// process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the address the server will bind to.
    #[cfg_attr(not(test), expect(dead_code, reason = "Exercised by server tests"))]
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (&self.bind_addr.0, self.bind_addr.1)
    }
}
