use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    error::{validation, AppError, AppResult},
    state::AppState,
    types::{Envelope, LoginRequest, RegisterRequest, Role},
};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    validation::require_all_non_empty(
        &[&req.email, &req.password, &req.role],
        "Email, password, and role are required",
    )?;
    let role = Role::parse(&req.role).ok_or_else(|| {
        AppError::Validation("Role must be either 'Uploader' or 'Reviewer'".to_string())
    })?;

    let account = state.credentials.create(&req.email, &req.password, role).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Account registered successfully", account.summary())),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    validation::require_all_non_empty(
        &[&req.email, &req.password],
        "Email and password are required",
    )?;

    let account = state.credentials.verify(&req.email, &req.password).await?;
    let token = state.tokens.issue(&account)?;

    tracing::info!(account_id = account.id, "login successful");

    Ok(Json(Envelope::new(
        "Login successful",
        json!({ "token": token, "account": account.summary() }),
    )))
}
