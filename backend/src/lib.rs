//! Task and user management service.
//!
//! The crate is organised in hexagonal layers: [`domain`] holds the business
//! rules and ports, [`outbound`] the storage adapters and [`inbound`] the
//! HTTP adapter.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
