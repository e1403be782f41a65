use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::SessionClaims;
use crate::error::{AppError, AppResult};
use crate::types::Role;

/// Rejects the request with 403 unless the session attached by the auth
/// layer asserts exactly `required`. There is no hierarchy between roles.
pub async fn require_role(required: Role, req: Request, next: Next) -> AppResult<Response> {
    let Some(claims) = req.extensions().get::<SessionClaims>() else {
        // Only reachable if a route skips the session layer.
        return Err(AppError::Unauthorized("Access token required".to_string()));
    };

    if claims.role != required {
        tracing::debug!(held = %claims.role, required = %required, "role check failed");
        return Err(AppError::Forbidden(format!(
            "Access denied. {} role required.",
            required
        )));
    }

    Ok(next.run(req).await)
}

pub async fn require_uploader(req: Request, next: Next) -> AppResult<Response> {
    require_role(Role::Uploader, req, next).await
}

pub async fn require_reviewer(req: Request, next: Next) -> AppResult<Response> {
    require_role(Role::Reviewer, req, next).await
}
