//! Typed CRUD wrapper over the `/habits` endpoints

use async_trait::async_trait;
use shared::client::{HabitEnvelope, HabitListEnvelope, LoginRequest, LoginResponse, UserInfo};
use shared::models::{HabitCreate, HabitRecord, HabitUpdate};

use crate::http::HttpClient;
use crate::session::{SessionError, SessionGate};
use crate::{ClientConfig, ClientError, ClientResult};

/// The operations the view-model needs from the remote API
#[async_trait]
pub trait HabitApi: Send + Sync {
    /// Full collection for the current identity, in server order
    async fn list_all(&self) -> ClientResult<Vec<HabitRecord>>;

    async fn get_one(&self, id: &str) -> ClientResult<HabitRecord>;

    async fn create(&self, draft: &HabitCreate) -> ClientResult<HabitRecord>;

    /// Partial update: fields left `None` are untouched server-side
    async fn update(&self, id: &str, draft: &HabitUpdate) -> ClientResult<HabitRecord>;

    /// Not idempotent: deleting an already-deleted id is `NotFound`
    async fn delete(&self, id: &str) -> ClientResult<()>;
}

fn require_text(field: &str, value: &str) -> ClientResult<()> {
    if value.trim().is_empty() {
        return Err(ClientError::validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_positive(field: &str, value: u32) -> ClientResult<()> {
    if value == 0 {
        return Err(ClientError::validation(format!(
            "{} must be at least 1",
            field
        )));
    }
    Ok(())
}

/// Reject a create payload with a missing/empty required field
pub fn validate_create(draft: &HabitCreate) -> ClientResult<()> {
    require_text("Name", &draft.name)?;
    require_text("Description", &draft.description)?;
    require_positive("Target count", draft.target_count)
}

/// Reject an empty patch, or one that would blank out a required field
pub fn validate_update(draft: &HabitUpdate) -> ClientResult<()> {
    if draft.is_empty() {
        return Err(ClientError::validation("Nothing to update"));
    }
    if let Some(name) = &draft.name {
        require_text("Name", name)?;
    }
    if let Some(description) = &draft.description {
        require_text("Description", description)?;
    }
    if let Some(target_count) = draft.target_count {
        require_positive("Target count", target_count)?;
    }
    Ok(())
}

const HABITS: &str = "habits";

/// `habits/{id}` as path segments; the id is escaped by the transport
///
/// `.` and `..` would be dropped while building the URL, so no habit can have
/// them as its id.
fn habit_path(id: &str) -> ClientResult<[&str; 2]> {
    if id.trim().is_empty() {
        return Err(ClientError::NotFound(Some("Habit id is empty".to_string())));
    }
    if matches!(id, "." | "..") {
        return Err(ClientError::NotFound(None));
    }
    Ok([HABITS, id])
}

/// Habit API client
#[derive(Debug, Clone)]
pub struct HabitClient {
    http: HttpClient,
}

impl HabitClient {
    pub fn new(config: &ClientConfig, session: SessionGate) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config, session)?,
        })
    }

    pub fn session(&self) -> &SessionGate {
        self.http.session()
    }

    /// Log in and store the returned credential in the session
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserInfo> {
        require_text("Email", email)?;
        require_text("Password", password)?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.http.post_public(&["auth", "login"], &request).await?;

        if let Err(e) = self
            .session()
            .set_credentials(response.user.clone(), response.token)
            .await
        {
            tracing::warn!(error = %e, "Logged in, but the session could not be persisted");
        }
        Ok(response.user)
    }

    /// Drop the local session
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.session().logout().await
    }
}

#[async_trait]
impl HabitApi for HabitClient {
    async fn list_all(&self) -> ClientResult<Vec<HabitRecord>> {
        let envelope: HabitListEnvelope = self.http.get(&[HABITS]).await?;
        let habits = envelope.into_habits();
        tracing::debug!(count = habits.len(), "Fetched habits");
        Ok(habits)
    }

    async fn get_one(&self, id: &str) -> ClientResult<HabitRecord> {
        let envelope: HabitEnvelope = self.http.get(&habit_path(id)?).await?;
        Ok(envelope.into_habit())
    }

    async fn create(&self, draft: &HabitCreate) -> ClientResult<HabitRecord> {
        validate_create(draft)?;
        let envelope: HabitEnvelope = self.http.post(&[HABITS], draft).await?;
        let habit = envelope.into_habit();
        tracing::info!(id = %habit.id, name = %habit.name, "Habit created");
        Ok(habit)
    }

    async fn update(&self, id: &str, draft: &HabitUpdate) -> ClientResult<HabitRecord> {
        let path = habit_path(id)?;
        validate_update(draft)?;
        let envelope: HabitEnvelope = self.http.put(&path, draft).await?;
        let habit = envelope.into_habit();
        tracing::info!(id = %habit.id, "Habit updated");
        Ok(habit)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&habit_path(id)?).await?;
        tracing::info!(id, "Habit deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use shared::models::Frequency;

    fn draft() -> HabitCreate {
        HabitCreate {
            name: "Read".to_string(),
            description: "30 min".to_string(),
            frequency: Frequency::Daily,
            target_count: 1,
        }
    }

    #[test]
    fn test_validate_create() {
        assert!(validate_create(&draft()).is_ok());

        let err = validate_create(&HabitCreate {
            name: "   ".to_string(),
            ..draft()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Name is required");

        let err = validate_create(&HabitCreate {
            description: String::new(),
            ..draft()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Description is required");

        let err = validate_create(&HabitCreate {
            target_count: 0,
            ..draft()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_validate_update_only_checks_present_fields() {
        let err = validate_update(&HabitUpdate::default()).unwrap_err();
        assert_eq!(err.to_string(), "Nothing to update");
        assert!(
            validate_update(&HabitUpdate {
                is_active: Some(false),
                ..Default::default()
            })
            .is_ok()
        );

        let err = validate_update(&HabitUpdate {
            name: Some(String::new()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_habit_path() {
        assert_eq!(habit_path("abc").unwrap(), ["habits", "abc"]);
        assert_eq!(habit_path("a?b").unwrap(), ["habits", "a?b"]);
        for id in ["", "  ", ".", ".."] {
            assert_eq!(habit_path(id).unwrap_err().kind(), ErrorKind::NotFound);
        }
    }

    #[tokio::test]
    async fn test_create_validates_before_auth() {
        let client =
            HabitClient::new(&ClientConfig::new("http://127.0.0.1:9"), SessionGate::in_memory())
                .unwrap();
        let err = client
            .create(&HabitCreate {
                name: String::new(),
                ..draft()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = client.list_all().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
