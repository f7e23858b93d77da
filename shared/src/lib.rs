//! Shared types for the PassPrive partner platform
//!
//! Common types used across multiple crates including HTTP types,
//! error types, response structures, and utility types.

pub mod error;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use util::{now_millis, secure_code};
