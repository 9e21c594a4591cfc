//! Habit Client - data synchronization layer for the habit tracker
//!
//! - [`HabitClient`]: typed CRUD calls against the remote habit API
//! - [`HabitStore`]: dashboard view-model, always re-fetching after a mutation
//! - [`FormDraft`] / [`FormModal`]: the create/edit form state
//! - [`SessionGate`]: the bearer credential every request is made with

pub mod config;
pub mod draft;
pub mod error;
pub mod habits;
pub mod http;
pub mod session;
pub mod store;

pub use config::ClientConfig;
pub use draft::{DraftMode, FormDraft, FormModal};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use habits::{HabitApi, HabitClient};
pub use http::HttpClient;
pub use session::{CredentialStorage, SessionError, SessionGate};
pub use store::{HabitStore, StoreSnapshot, SubmitOutcome};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, UserInfo, UserPatch};
pub use shared::models::{Frequency, HabitCreate, HabitRecord, HabitUpdate};
