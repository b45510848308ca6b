//! Quora-style Q&A backend.
//!
//! Hexagonal layout: [`domain`] holds the model, services, and ports;
//! [`inbound::http`] adapts them to actix-web; [`outbound`] provides the
//! PostgreSQL repositories and credential adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
