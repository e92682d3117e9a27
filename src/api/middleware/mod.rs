//! API middleware components

pub mod analytics;
pub mod cors;
pub mod logging;

pub use analytics::analytics_middleware;
pub use cors::cors_middleware;
pub use logging::logging_middleware;
