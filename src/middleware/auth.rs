use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Middleware that validates the `Authorization: Bearer <token>` header on
/// every protected request.
///
/// A missing header (or one without the Bearer scheme) is rejected with 401;
/// a token that fails verification is rejected with 403. On success the
/// decoded session claims are attached to the request extensions for the
/// role layer and the handlers. No other side effects.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = bearer else {
        return Err(AppError::Unauthorized("Access token required".to_string()));
    };

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("session token rejected: {}", e);
        AppError::Forbidden("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
