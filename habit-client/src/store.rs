//! HabitStore - dashboard view-model
//!
//! Holds the cached habit list plus loading/error state. The cache is only
//! ever replaced wholesale by a successful `list_all`; mutations never patch
//! it locally, they are always followed by a full refresh.

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use shared::models::HabitRecord;

use crate::draft::{DraftMode, FormDraft};
use crate::error::ClientError;
use crate::habits::HabitApi;

pub const LOAD_FAILED: &str = "Failed to load habits";
pub const SAVE_FAILED: &str = "Failed to save habit";
pub const DELETE_FAILED: &str = "Failed to delete habit";

/// Point-in-time copy of the store state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub habits: Vec<HabitRecord>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

/// Result of [`HabitStore::submit_draft`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Mutation accepted and list reloaded; the form should close
    Saved,
    /// Mutation rejected; the form stays open with its fields intact
    Failed,
}

impl SubmitOutcome {
    pub fn should_close(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    habits: Vec<HabitRecord>,
    last_error: Option<String>,
}

/// Counts a fetch as in flight until dropped, however the fetch ends
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Server message when there is one, else the per-operation fallback
fn describe(err: &ClientError, fallback: &str) -> String {
    err.detail()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

pub struct HabitStore<A: HabitApi> {
    api: A,
    state: RwLock<StoreState>,
    in_flight: AtomicUsize,
}

impl<A: HabitApi> HabitStore<A> {
    /// An empty store; call [`refresh`](Self::refresh) to load it
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(StoreState::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn habits(&self) -> Vec<HabitRecord> {
        self.state.read().await.habits.clone()
    }

    /// True while at least one refresh is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot {
            habits: state.habits.clone(),
            is_loading: self.is_loading(),
            last_error: state.last_error.clone(),
        }
    }

    /// Dismiss the error banner
    pub async fn clear_error(&self) {
        self.state.write().await.last_error = None;
    }

    /// Reload the full list from the server
    ///
    /// Overlapping refreshes are not cancelled: each successful one replaces
    /// the list wholesale, so the last to complete wins.
    pub async fn refresh(&self) {
        let _loading = LoadingGuard::start(&self.in_flight);
        self.state.write().await.last_error = None;

        match self.api.list_all().await {
            Ok(habits) => {
                self.state.write().await.habits = habits;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load habits");
                self.state.write().await.last_error = Some(describe(&e, LOAD_FAILED));
            }
        }
    }

    /// Create or update depending on the draft's mode, then reload
    ///
    /// The refresh only starts once the mutation response is in.
    pub async fn submit_draft(&self, draft: &FormDraft) -> SubmitOutcome {
        let result = match draft.mode() {
            DraftMode::Create => self.api.create(&draft.to_create()).await,
            DraftMode::Edit { id } => self.api.update(id, &draft.to_update()).await,
        };

        match result {
            Ok(_) => {
                self.refresh().await;
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save habit");
                self.state.write().await.last_error = Some(describe(&e, SAVE_FAILED));
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete a habit the user has already confirmed, then reload
    ///
    /// Returns whether the delete went through.
    pub async fn remove_habit(&self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Failed to delete habit");
                self.state.write().await.last_error = Some(describe(&e, DELETE_FAILED));
                false
            }
        }
    }
}
