//! Shared types for the habit tracker
//!
//! Wire models, request/response envelopes and the error types used by both
//! the client and the mock server.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use client::{HabitEnvelope, HabitListEnvelope, LoginRequest, LoginResponse, UserInfo};
pub use models::{Frequency, HabitCreate, HabitRecord, HabitUpdate};
