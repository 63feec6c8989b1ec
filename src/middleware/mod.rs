//! HTTP middleware and extractors

pub mod auth;
pub mod metrics;

pub use auth::AuthUser;
pub use metrics::ObservabilityLayer;
