//! Auth route handlers.
//!
//! Register and login both leave the caller with a live session. The `User`
//! wire shape never includes the password field.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::info;

use fashionzone_core::{User, Username};

use crate::error::AppError;
use crate::middleware::auth::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

use super::parse_body;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    fn username(&self) -> Result<Username, AppError> {
        Username::parse(&self.username).map_err(|err| AppError::Validation(err.to_string()))
    }
}

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let request: CredentialsRequest = parse_body(body)?;
    let username = request.username()?;
    if request.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".to_owned()));
    }

    let user = state.auth().register(username, &request.password).await?;
    set_current_user(&session, &CurrentUser::from(&user)).await?;

    info!(user_id = %user.id, "account created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<User>, AppError> {
    let request: CredentialsRequest = parse_body(body)?;
    let username = request.username()?;

    let user = state.auth().login(&username, &request.password).await?;

    // A fresh login must not inherit any prior session state.
    session.cycle_id().await?;
    set_current_user(&session, &CurrentUser::from(&user)).await?;

    info!(user_id = %user.id, "login");
    Ok(Json(user))
}

/// `POST /api/logout`
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>, AppError> {
    clear_current_user(&session).await?;
    session.flush().await?;
    Ok(Json(json!({ "message": "Logged out" })))
}

/// `GET /api/user`
///
/// Reads back from storage rather than echoing the session, so a deleted
/// account stops authenticating immediately.
pub async fn current_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<User>, AppError> {
    let user = state
        .store
        .user_by_id(user.id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(user))
}
