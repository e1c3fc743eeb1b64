//! HTTP API module for the search, health, and metrics endpoints.

pub mod error;
pub mod handlers;
pub mod params;
pub mod routes;

pub use error::ApiError;
pub use handlers::AppState;
pub use routes::create_router;
