use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{AppError, AppResult};
use crate::models::{CreateReminder, Reminder, UpdateReminder};
use crate::repositories::{CategoryRepository, ReminderRepository};
use crate::state::AppState;

async fn ensure_category(state: &AppState, category_id: Option<i64>) -> AppResult<()> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    CategoryRepository::get_by_id(&state.db, category_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::bad_request(format!("Unknown category {}", category_id)))
}

/// List reminders, open ones first
#[utoipa::path(
    get,
    path = "/api/reminders",
    tag = "reminders",
    responses(
        (status = 200, description = "List of reminders", body = Vec<Reminder>)
    )
)]
pub async fn list_reminders(State(state): State<AppState>) -> AppResult<Json<Vec<Reminder>>> {
    let reminders = ReminderRepository::get_all(&state.db).await?;
    Ok(Json(reminders))
}

/// Create a reminder
#[utoipa::path(
    post,
    path = "/api/reminders",
    tag = "reminders",
    request_body = CreateReminder,
    responses(
        (status = 201, description = "Reminder created", body = Reminder),
        (status = 400, description = "Missing title or unknown category")
    )
)]
pub async fn create_reminder(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateReminder>,
) -> AppResult<(StatusCode, Json<Reminder>)> {
    payload.title = payload.title.trim().to_string();
    if payload.title.is_empty() {
        return Err(AppError::bad_request("Title is required"));
    }
    ensure_category(&state, payload.category_id).await?;

    let reminder = ReminderRepository::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// Update a reminder
///
/// Absent fields are left untouched; `description` and `category_id` can be
/// cleared with an explicit `null`.
#[utoipa::path(
    patch,
    path = "/api/reminders/{id}",
    tag = "reminders",
    params(
        ("id" = i64, Path, description = "Reminder ID")
    ),
    request_body = UpdateReminder,
    responses(
        (status = 200, description = "Reminder updated", body = Reminder),
        (status = 400, description = "Empty title or unknown category"),
        (status = 404, description = "Reminder not found")
    )
)]
pub async fn update_reminder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<UpdateReminder>,
) -> AppResult<Json<Reminder>> {
    if let Some(title) = payload.title.as_mut() {
        *title = title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::bad_request("Title cannot be empty"));
        }
    }
    ensure_category(&state, payload.category_id.as_set().copied()).await?;

    ReminderRepository::update(&state.db, id, payload)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Reminder {} not found", id)))
}

/// Delete a reminder
#[utoipa::path(
    delete,
    path = "/api/reminders/{id}",
    tag = "reminders",
    params(
        ("id" = i64, Path, description = "Reminder ID")
    ),
    responses(
        (status = 204, description = "Reminder deleted"),
        (status = 404, description = "Reminder not found")
    )
)]
pub async fn delete_reminder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if ReminderRepository::delete(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Reminder {} not found", id)))
    }
}
