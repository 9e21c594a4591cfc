//! Data models
//!
//! Shared between the habit client and the mock server.

pub mod habit;

// Re-exports
pub use habit::*;
