//! In-memory state for the mock habit server

use chrono::Utc;
use shared::client::UserInfo;
use shared::error::{AppError, AppResult};
use shared::models::{HabitCreate, HabitRecord, HabitUpdate};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Seeded account every fresh server accepts
pub const DEMO_EMAIL: &str = "demo@habits.test";
pub const DEMO_PASSWORD: &str = "habits123";

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub user_store: UserStore,
    pub habit_store: HabitStore,
    /// Answer `GET /habits` with a bare array instead of `{ "habits": [...] }`
    bare_list: AtomicBool,
    habit_requests: AtomicUsize,
}

impl AppState {
    pub fn new(bare_list: bool) -> Self {
        Self {
            user_store: UserStore::new(),
            habit_store: HabitStore::default(),
            bare_list: AtomicBool::new(bare_list),
            habit_requests: AtomicUsize::new(0),
        }
    }

    pub fn shared(bare_list: bool) -> SharedState {
        Arc::new(Self::new(bare_list))
    }

    pub fn bare_list(&self) -> bool {
        self.bare_list.load(Ordering::Relaxed)
    }

    pub fn set_bare_list(&self, bare: bool) {
        self.bare_list.store(bare, Ordering::Relaxed);
    }

    /// Number of requests that reached a `/habits` handler, authorized or not
    pub fn habit_requests(&self) -> usize {
        self.habit_requests.load(Ordering::Relaxed)
    }

    pub(crate) fn record_habit_request(&self) {
        self.habit_requests.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(false)
    }
}

struct MockUser {
    info: UserInfo,
    password: String,
}

/// Accounts plus the bearer tokens issued to them
pub struct UserStore {
    // email -> account
    users: RwLock<HashMap<String, MockUser>>,
    // token -> user id
    tokens: RwLock<HashMap<String, String>>,
}

impl UserStore {
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert(
            DEMO_EMAIL.to_string(),
            MockUser {
                info: UserInfo {
                    id: "user-demo".to_string(),
                    email: DEMO_EMAIL.to_string(),
                    name: Some("Demo User".to_string()),
                },
                password: DEMO_PASSWORD.to_string(),
            },
        );
        Self {
            users: RwLock::new(users),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Register another account; replaces one with the same email
    pub async fn add_user(&self, email: &str, password: &str, name: Option<&str>) -> UserInfo {
        let info = UserInfo {
            id: format!("user-{}", uuid::Uuid::new_v4().simple()),
            email: email.to_string(),
            name: name.map(str::to_string),
        };
        self.users.write().await.insert(
            email.to_string(),
            MockUser {
                info: info.clone(),
                password: password.to_string(),
            },
        );
        info
    }

    /// Check the credentials and issue a fresh token
    pub async fn login(&self, email: &str, password: &str) -> Option<(String, UserInfo)> {
        let info = {
            let users = self.users.read().await;
            let user = users.get(email)?;
            if user.password != password {
                return None;
            }
            user.info.clone()
        };

        let token = uuid::Uuid::new_v4().simple().to_string();
        self.tokens
            .write()
            .await
            .insert(token.clone(), info.id.clone());
        Some((token, info))
    }

    /// Resolve a bearer token to its user id
    pub async fn user_for_token(&self, token: &str) -> Option<String> {
        self.tokens.read().await.get(token).cloned()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Habit rows in creation order
///
/// Lookups are scoped to the owner; another user's habit behaves as if it
/// did not exist.
#[derive(Default)]
pub struct HabitStore {
    habits: RwLock<Vec<HabitRecord>>,
}

impl HabitStore {
    pub async fn list(&self, owner_id: &str) -> Vec<HabitRecord> {
        self.habits
            .read()
            .await
            .iter()
            .filter(|h| h.owner_id == owner_id)
            .cloned()
            .collect()
    }

    pub async fn get(&self, owner_id: &str, id: &str) -> AppResult<HabitRecord> {
        self.habits
            .read()
            .await
            .iter()
            .find(|h| h.id == id && h.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| AppError::habit_not_found(id))
    }

    pub async fn create(&self, owner_id: &str, draft: HabitCreate) -> HabitRecord {
        let now = Utc::now();
        let habit = HabitRecord {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name: draft.name,
            description: draft.description,
            frequency: draft.frequency,
            target_count: draft.target_count,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.habits.write().await.push(habit.clone());
        habit
    }

    /// Merge the set fields of `patch`; `id`, owner and `createdAt` never change
    pub async fn update(
        &self,
        owner_id: &str,
        id: &str,
        patch: HabitUpdate,
    ) -> AppResult<HabitRecord> {
        let mut habits = self.habits.write().await;
        let habit = habits
            .iter_mut()
            .find(|h| h.id == id && h.owner_id == owner_id)
            .ok_or_else(|| AppError::habit_not_found(id))?;

        if let Some(name) = patch.name {
            habit.name = name;
        }
        if let Some(description) = patch.description {
            habit.description = description;
        }
        if let Some(frequency) = patch.frequency {
            habit.frequency = frequency;
        }
        if let Some(target_count) = patch.target_count {
            habit.target_count = target_count;
        }
        if let Some(is_active) = patch.is_active {
            habit.is_active = is_active;
        }
        habit.updated_at = Utc::now();
        Ok(habit.clone())
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> AppResult<()> {
        let mut habits = self.habits.write().await;
        let index = habits
            .iter()
            .position(|h| h.id == id && h.owner_id == owner_id)
            .ok_or_else(|| AppError::habit_not_found(id))?;
        habits.remove(index);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.habits.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;
    use shared::models::Frequency;

    fn draft(name: &str) -> HabitCreate {
        HabitCreate {
            name: name.to_string(),
            description: "desc".to_string(),
            frequency: Frequency::Weekly,
            target_count: 2,
        }
    }

    #[tokio::test]
    async fn test_demo_login_issues_distinct_tokens() {
        let users = UserStore::new();
        let (first, info) = users.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        let (second, _) = users.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(users.user_for_token(&first).await, Some(info.id));

        assert!(users.login(DEMO_EMAIL, "wrong").await.is_none());
        assert!(users.login("nobody@habits.test", DEMO_PASSWORD).await.is_none());
        assert!(users.user_for_token("bogus").await.is_none());
    }

    #[tokio::test]
    async fn test_habits_are_scoped_to_owner() {
        let store = HabitStore::default();
        let mine = store.create("u1", draft("Read")).await;
        store.create("u2", draft("Swim")).await;

        assert_eq!(store.list("u1").await, vec![mine.clone()]);
        let err = store.get("u2", &mine.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::HabitNotFound);
        assert!(store.delete("u2", &mine.id).await.is_err());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let store = HabitStore::default();
        let created = store.create("u1", draft("Read")).await;

        let updated = store
            .update(
                "u1",
                &created.id,
                HabitUpdate {
                    target_count: Some(5),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Read");
        assert_eq!(updated.target_count, 5);
        assert!(!updated.is_active);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let store = HabitStore::default();
        let created = store.create("u1", draft("Read")).await;
        store.delete("u1", &created.id).await.unwrap();
        let err = store.delete("u1", &created.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::HabitNotFound);
        assert!(store.is_empty().await);
    }
}
