//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `TEAMTASK_*` environment variables, command-line flags or
//! a configuration file. Without a database URL the server keeps its data in
//! memory.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Runtime settings for the task service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TEAMTASK")]
pub struct TeamTaskSettings {
    /// Interface the HTTP listener binds to.
    #[ortho_config(default = String::from("0.0.0.0"))]
    pub host: String,
    /// Port the HTTP listener binds to.
    #[ortho_config(default = 8000)]
    pub port: u16,
    /// PostgreSQL connection string. Unset selects in-memory storage.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub max_connections: u32,
}

impl TeamTaskSettings {
    /// Configured host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Address pair accepted by `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Database URL, if persistent storage is configured. Blank values count
    /// as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Upper bound on pooled database connections.
    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }
}
