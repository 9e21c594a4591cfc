//! Form draft backing the create/edit modal
//!
//! A draft is rebuilt from scratch whenever the modal opens, so fields never
//! leak from one habit into the next.

use shared::models::{Frequency, HabitCreate, HabitRecord, HabitUpdate};

use crate::habits::HabitApi;
use crate::store::{HabitStore, SubmitOutcome};

/// Whether submitting creates a new habit or updates an existing one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftMode {
    #[default]
    Create,
    Edit { id: String },
}

/// Editable copy of a habit's fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    mode: DraftMode,
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub target_count: u32,
}

impl FormDraft {
    /// Empty create form: daily, once per period
    pub fn blank() -> Self {
        let defaults = HabitCreate::default();
        Self {
            mode: DraftMode::Create,
            name: defaults.name,
            description: defaults.description,
            frequency: defaults.frequency,
            target_count: defaults.target_count,
        }
    }

    /// Edit form pre-filled from `habit`
    pub fn for_habit(habit: &HabitRecord) -> Self {
        Self {
            mode: DraftMode::Edit {
                id: habit.id.clone(),
            },
            name: habit.name.clone(),
            description: habit.description.clone(),
            frequency: habit.frequency,
            target_count: habit.target_count,
        }
    }

    pub fn mode(&self) -> &DraftMode {
        &self.mode
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            DraftMode::Create => None,
            DraftMode::Edit { id } => Some(id.as_str()),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id().is_some()
    }

    /// Bind the raw text of the target-count input
    ///
    /// Anything that is not a whole number becomes 0, which validation rejects.
    pub fn set_target_count_input(&mut self, raw: &str) {
        self.target_count = raw.trim().parse().unwrap_or(0);
    }

    pub fn to_create(&self) -> HabitCreate {
        HabitCreate {
            name: self.name.clone(),
            description: self.description.clone(),
            frequency: self.frequency,
            target_count: self.target_count,
        }
    }

    /// The edit form always sends every field it shows
    pub fn to_update(&self) -> HabitUpdate {
        self.to_create().into()
    }
}

impl Default for FormDraft {
    fn default() -> Self {
        Self::blank()
    }
}

/// Modal visibility over a [`FormDraft`]
#[derive(Debug, Clone, Default)]
pub struct FormModal {
    open: bool,
    draft: FormDraft,
}

impl FormModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_create(&mut self) {
        self.draft = FormDraft::blank();
        self.open = true;
    }

    pub fn open_edit(&mut self, habit: &HabitRecord) {
        self.draft = FormDraft::for_habit(habit);
        self.open = true;
    }

    /// Close without submitting; the draft goes back to blank
    pub fn dismiss(&mut self) {
        self.open = false;
        self.draft = FormDraft::blank();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }

    pub fn title(&self) -> &'static str {
        if self.draft.is_edit() {
            "Edit Habit"
        } else {
            "Create New Habit"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.draft.is_edit() { "Update" } else { "Create" }
    }

    /// Submit through the store; closes on success, stays open on failure
    pub async fn submit<A: HabitApi>(&mut self, store: &HabitStore<A>) -> SubmitOutcome {
        let outcome = store.submit_draft(&self.draft).await;
        if outcome.should_close() {
            self.dismiss();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn habit(id: &str, name: &str, frequency: Frequency, target_count: u32) -> HabitRecord {
        HabitRecord {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            name: name.to_string(),
            description: format!("about {}", name),
            frequency,
            target_count,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_blank_defaults() {
        let draft = FormDraft::blank();
        assert_eq!(draft.mode(), &DraftMode::Create);
        assert!(draft.name.is_empty());
        assert!(draft.description.is_empty());
        assert_eq!(draft.frequency, Frequency::Daily);
        assert_eq!(draft.target_count, 1);
        assert_eq!(draft, FormDraft::default());
    }

    #[test]
    fn test_prefilled_from_habit() {
        let draft = FormDraft::for_habit(&habit("h1", "Run", Frequency::Weekly, 3));
        assert_eq!(draft.editing_id(), Some("h1"));
        assert_eq!(draft.name, "Run");
        assert_eq!(draft.description, "about Run");
        assert_eq!(draft.frequency, Frequency::Weekly);
        assert_eq!(draft.target_count, 3);

        let update = draft.to_update();
        assert_eq!(update.name.as_deref(), Some("Run"));
        assert_eq!(update.target_count, Some(3));
        assert!(update.is_active.is_none());
    }

    #[test]
    fn test_target_count_input() {
        let mut draft = FormDraft::blank();
        draft.set_target_count_input(" 4 ");
        assert_eq!(draft.target_count, 4);
        draft.set_target_count_input("four");
        assert_eq!(draft.target_count, 0);
    }

    #[test]
    fn test_modal_rebuilds_draft_between_edits() {
        let mut modal = FormModal::new();
        assert!(!modal.is_open());

        modal.open_edit(&habit("h1", "Run", Frequency::Weekly, 3));
        modal.draft_mut().name = "Run far".to_string();
        assert_eq!(modal.title(), "Edit Habit");
        assert_eq!(modal.submit_label(), "Update");

        // Opening another habit must not carry the unsaved rename over
        modal.open_edit(&habit("h2", "Swim", Frequency::Monthly, 1));
        assert_eq!(modal.draft().editing_id(), Some("h2"));
        assert_eq!(modal.draft().name, "Swim");
        assert_eq!(modal.draft().frequency, Frequency::Monthly);
    }

    #[test]
    fn test_modal_dismiss_resets() {
        let mut modal = FormModal::new();
        modal.open_edit(&habit("h1", "Run", Frequency::Weekly, 3));
        modal.dismiss();
        assert!(!modal.is_open());
        assert_eq!(modal.draft(), &FormDraft::blank());

        modal.open_create();
        assert!(modal.is_open());
        assert_eq!(modal.title(), "Create New Habit");
        assert_eq!(modal.submit_label(), "Create");
    }
}
