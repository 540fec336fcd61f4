//! Notification route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use fashionzone_core::{Notification, NotificationId, UserId};

use crate::error::AppError;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

use super::parse_id;

/// `GET /api/notifications`
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = state.store.notifications(user.id).await?;
    Ok(Json(notifications))
}

/// `PATCH /api/notifications/{id}`
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    let id = NotificationId::new(parse_id(&id)?);

    if !owns_notification(&state, user.id, id).await? {
        return Err(AppError::NotFound("Notification"));
    }

    let row = state
        .store
        .mark_notification_read(id)
        .await?
        .ok_or(AppError::NotFound("Notification"))?;
    Ok(Json(row))
}

/// `DELETE /api/notifications/{id}`
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = NotificationId::new(parse_id(&id)?);

    if !owns_notification(&state, user.id, id).await? {
        return Err(AppError::NotFound("Notification"));
    }

    if state.store.delete_notification(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Notification"))
    }
}

async fn owns_notification(
    state: &AppState,
    user_id: UserId,
    id: NotificationId,
) -> Result<bool, AppError> {
    let notifications = state.store.notifications(user_id).await?;
    Ok(notifications.iter().any(|n| n.id == id))
}
