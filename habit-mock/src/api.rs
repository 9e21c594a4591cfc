//! HTTP routes of the mock habit server
//!
//! Errors go out as [`ApiResponse`] bodies via [`AppError`]'s `IntoResponse`,
//! so the client sees `{ "code", "message" }` with the matching status.

use crate::state::SharedState;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use shared::client::{HabitEnvelope, HabitListEnvelope, LoginRequest, LoginResponse};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Frequency, HabitCreate, HabitUpdate};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

/// Create body as received; missing fields are reported by name
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody {
    name: Option<String>,
    description: Option<String>,
    frequency: Option<Frequency>,
    target_count: Option<u32>,
}

fn required_text(field: &str, value: Option<String>) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::required(field)),
    }
}

fn check_target_count(target_count: u32) -> AppResult<u32> {
    if target_count == 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "Target count must be at least 1",
        )
        .with_detail("field", "targetCount"));
    }
    Ok(target_count)
}

impl CreateBody {
    fn validate(self) -> AppResult<HabitCreate> {
        Ok(HabitCreate {
            name: required_text("Name", self.name)?,
            description: required_text("Description", self.description)?,
            frequency: self.frequency.unwrap_or_default(),
            target_count: check_target_count(self.target_count.unwrap_or(1))?,
        })
    }
}

fn validate_update(patch: HabitUpdate) -> AppResult<HabitUpdate> {
    if patch.is_empty() {
        return Err(AppError::validation("Nothing to update"));
    }
    if let Some(name) = &patch.name
        && name.trim().is_empty()
    {
        return Err(AppError::required("Name"));
    }
    if let Some(description) = &patch.description
        && description.trim().is_empty()
    {
        return Err(AppError::required("Description"));
    }
    if let Some(target_count) = patch.target_count {
        check_target_count(target_count)?;
    }
    Ok(patch)
}

/// Resolve the caller from `Authorization: Bearer <token>`
async fn authenticate(state: &SharedState, headers: &HeaderMap) -> AppResult<String> {
    state.record_habit_request();

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::not_authenticated)?;

    state
        .user_store
        .user_for_token(token)
        .await
        .ok_or_else(|| AppError::invalid_token("Invalid or expired token"))
}

async fn login(
    State(state): State<SharedState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    let (token, user) = state
        .user_store
        .login(&req.email, &req.password)
        .await
        .ok_or_else(|| {
            tracing::info!(email = %req.email, "Rejected login");
            AppError::invalid_credentials()
        })?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse { token, user }))
}

async fn list_habits(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> AppResult<Json<HabitListEnvelope>> {
    let user_id = authenticate(&state, &headers).await?;
    let habits = state.habit_store.list(&user_id).await;

    let envelope = if state.bare_list() {
        HabitListEnvelope::Bare(habits)
    } else {
        HabitListEnvelope::Wrapped { habits }
    };
    Ok(Json(envelope))
}

async fn get_habit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> AppResult<Json<HabitEnvelope>> {
    let user_id = authenticate(&state, &headers).await?;
    let habit = state.habit_store.get(&user_id, &id).await?;
    Ok(Json(HabitEnvelope::Wrapped { habit }))
}

async fn create_habit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<CreateBody>, JsonRejection>,
) -> AppResult<Response> {
    let user_id = authenticate(&state, &headers).await?;
    let Json(body) = payload?;
    let draft = body.validate()?;
    let habit = state.habit_store.create(&user_id, draft).await;

    tracing::info!(id = %habit.id, user_id = %user_id, "Habit created");
    Ok((StatusCode::CREATED, Json(HabitEnvelope::Wrapped { habit })).into_response())
}

async fn update_habit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<HabitUpdate>, JsonRejection>,
) -> AppResult<Json<HabitEnvelope>> {
    let user_id = authenticate(&state, &headers).await?;
    let Json(patch) = payload?;
    let patch = validate_update(patch)?;
    let habit = state.habit_store.update(&user_id, &id, patch).await?;

    tracing::info!(id = %habit.id, "Habit updated");
    Ok(Json(HabitEnvelope::Wrapped { habit }))
}

async fn delete_habit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let user_id = authenticate(&state, &headers).await?;
    state.habit_store.delete(&user_id, &id).await?;

    tracing::info!(id = %id, "Habit deleted");
    Ok(Json(ApiResponse::ok()))
}

async fn route_not_found() -> AppError {
    AppError::new(ErrorCode::NotFound)
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/habits", get(list_habits).post(create_habit))
        .route(
            "/api/habits/{id}",
            get(get_habit).put(update_habit).delete(delete_habit),
        )
        .fallback(route_not_found)
        .layer(ConcurrencyLimitLayer::new(100))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
