//! Stateless search proxy for USDA FoodData Central and the YouTube Data API.
//!
//! Both endpoints hold the upstream API keys server side, fan out to the
//! upstream service, and return a flattened result list:
//!
//! ```text
//! GET /api/v1/usda-search?q=banana
//!   -> GET /foods/search          (1 call)
//!   -> GET /food/{fdcId}          (1 call per hit, sequential)
//!
//! GET /api/v1/youtube-search?q=lofi&limit=2
//!   -> GET /search                (1 call)
//!   -> GET /videos?id=a,b         (1 batched call)
//! ```
//!
//! # Modules
//!
//! - [`api`]: HTTP routes, handlers, and error responses
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`food`]: FoodData Central client, nutrient extraction, food search
//! - [`metrics`]: Prometheus metrics
//! - [`upstream`]: Shared HTTP client and JSON fetch helper
//! - [`utils`]: Utility functions
//! - [`video`]: YouTube client, result merge, video search

pub mod api;
pub mod config;
pub mod error;
pub mod food;
pub mod metrics;
pub mod upstream;
pub mod utils;
pub mod video;

pub use config::Config;
pub use error::{ProxyError, Result};
