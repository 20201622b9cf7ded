// src/api/mod.rs
// HTTP API: JSON task endpoints plus error and wire types

pub mod error;
pub mod http;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use http::create_router;
