//! Habit Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a habit is expected to be performed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];

    /// Wire name ("daily", "weekly", "monthly")
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// The period one target count applies to ("day", "week", "month")
    pub const fn period_noun(&self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_active() -> bool {
    true
}

/// Habit entity, as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRecord {
    pub id: String,
    /// Owning user; assigned by the server
    #[serde(rename = "userId", alias = "ownerId")]
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub target_count: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HabitRecord {
    /// e.g. "3x per week"
    pub fn target_label(&self) -> String {
        format!("{}x per {}", self.target_count, self.frequency.period_noun())
    }
}

/// Create habit payload
///
/// Every field is required. The same shape backs the edit form, which sends
/// it as a full [`HabitUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCreate {
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub target_count: u32,
}

impl Default for HabitCreate {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            frequency: Frequency::Daily,
            target_count: 1,
        }
    }
}

/// Update habit payload
///
/// Unset fields are left out of the request body and untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.frequency.is_none()
            && self.target_count.is_none()
            && self.is_active.is_none()
    }
}

impl From<HabitCreate> for HabitUpdate {
    fn from(draft: HabitCreate) -> Self {
        Self {
            name: Some(draft.name),
            description: Some(draft.description),
            frequency: Some(draft.frequency),
            target_count: Some(draft.target_count),
            is_active: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "h1",
            "userId": "u1",
            "name": "Read",
            "description": "30 min",
            "frequency": "weekly",
            "targetCount": 3,
            "isActive": false,
            "createdAt": "2026-01-02T03:04:05Z",
            "updatedAt": "2026-01-03T03:04:05Z"
        }"#
    }

    #[test]
    fn test_habit_record_from_wire() {
        let habit: HabitRecord = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(habit.id, "h1");
        assert_eq!(habit.owner_id, "u1");
        assert_eq!(habit.frequency, Frequency::Weekly);
        assert_eq!(habit.target_count, 3);
        assert!(!habit.is_active);
        assert_eq!(habit.target_label(), "3x per week");
    }

    #[test]
    fn test_owner_alias_and_active_default() {
        let json = r#"{
            "id": "h2", "ownerId": "u7", "name": "Run", "description": "5k",
            "frequency": "monthly", "targetCount": 1,
            "createdAt": "2026-01-02T03:04:05Z", "updatedAt": "2026-01-02T03:04:05Z"
        }"#;
        let habit: HabitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(habit.owner_id, "u7");
        assert!(habit.is_active);
    }

    #[test]
    fn test_unknown_frequency_rejected() {
        let json = sample_json().replace("weekly", "hourly");
        assert!(serde_json::from_str::<HabitRecord>(&json).is_err());
    }

    #[test]
    fn test_create_defaults() {
        let draft = HabitCreate::default();
        assert_eq!(draft.frequency, Frequency::Daily);
        assert_eq!(draft.target_count, 1);
        assert!(draft.name.is_empty());
    }

    #[test]
    fn test_update_omits_unset_fields() {
        let update = HabitUpdate {
            target_count: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "targetCount": 2 }));
        assert!(HabitUpdate::default().is_empty());
    }

    #[test]
    fn test_frequency_labels() {
        assert_eq!(Frequency::Daily.period_noun(), "day");
        assert_eq!(Frequency::Monthly.to_string(), "monthly");
        assert_eq!(
            serde_json::to_string(&Frequency::Weekly).unwrap(),
            "\"weekly\""
        );
    }
}
