//! Client-related types shared between server and client
//!
//! Request/response bodies used on the wire, including the envelopes the
//! habit endpoints wrap their payloads in.

use crate::models::HabitRecord;
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Partial user update, merged into the cached [`UserInfo`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserInfo {
    /// Apply the fields set in `patch`
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
    }
}

// =============================================================================
// Habit envelopes
// =============================================================================

/// `GET /habits` body
///
/// The server may answer `{ "habits": [...] }` or a bare array. Decoding tries
/// the wrapped shape first and falls back to the bare one; any other shape is
/// a decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HabitListEnvelope {
    Wrapped { habits: Vec<HabitRecord> },
    Bare(Vec<HabitRecord>),
}

impl HabitListEnvelope {
    pub fn into_habits(self) -> Vec<HabitRecord> {
        match self {
            Self::Wrapped { habits } => habits,
            Self::Bare(habits) => habits,
        }
    }
}

/// Single-habit body (`GET/POST/PUT /habits...`)
///
/// Same fallback rule as [`HabitListEnvelope`]: `{ "habit": {...} }` first,
/// then a bare record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HabitEnvelope {
    Wrapped { habit: HabitRecord },
    Bare(HabitRecord),
}

impl HabitEnvelope {
    pub fn into_habit(self) -> HabitRecord {
        match self {
            Self::Wrapped { habit } => habit,
            Self::Bare(habit) => habit,
        }
    }
}

/// Error body returned by the API
///
/// Only the human-readable text is of interest to the client. Servers put it
/// under `message`; some older endpoints use `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, returning its message if there is a non-empty one
    pub fn message_from(text: &str) -> Option<String> {
        let body: ErrorBody = serde_json::from_str(text).ok()?;
        let non_blank = |m: Option<String>| {
            m.map(|m| m.trim().to_string()).filter(|m| !m.is_empty())
        };
        non_blank(body.message).or_else(|| non_blank(body.error))
    }
}
