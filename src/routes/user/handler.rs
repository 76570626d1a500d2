use axum::{Json, body::Bytes, extract::State};

use crate::{AppState, error::AppError};

use super::model::{CreateUserRequest, User};

#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<User>, AppError> {
    let req = CreateUserRequest::from_body(&body)?;
    let id = state
        .users
        .create_user(&req.name, &req.email)
        .await?;
    Ok(Json(req.into_user(id)))
}
