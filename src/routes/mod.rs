//! HTTP route handlers for the ZahnArchiv API.
//!
//! Each sub-module covers one slice of the REST surface:
//!
//! - `auth`: registration and login
//! - `scans`: scan-record CRUD plus the role-scoped listings
//! - `meta`: distinct regions, aggregate stats, patient roster, profile
//! - `health`: liveness probe
//!
//! Success responses share the `{ message, data, pagination? }` envelope;
//! failures render through `AppError`. [`router`] assembles the full
//! surface including the session and role guards, so the binary and the
//! tests serve exactly the same tree.

pub mod auth;
pub mod health;
pub mod meta;
pub mod scans;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};

use crate::error::AppError;
use crate::middleware::{auth::require_session, role};
use crate::state::AppState;

/// Fallback for unmatched routes.
pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Builds the API router.
///
/// Protected routes are grouped per required role, each group wrapped by
/// its role guard, merged, and then wrapped by the session guard so the
/// token check always runs first. Routes shared by both roles carry only
/// the session guard.
pub fn router(state: AppState) -> Router {
    let uploader_routes = Router::new()
        .route("/scans", post(scans::create_scan))
        .route(
            "/scans/{id}",
            put(scans::update_scan).delete(scans::delete_scan),
        )
        .route("/my-scans", get(scans::list_my_scans))
        .layer(from_fn(role::require_uploader));

    let reviewer_routes = Router::new()
        .route("/scans", get(scans::list_scans))
        .route("/scans/{id}", get(scans::get_scan))
        .layer(from_fn(role::require_reviewer));

    let shared_routes = Router::new()
        .route("/regions", get(meta::list_regions))
        .route("/stats", get(meta::get_stats))
        .route("/patients", get(meta::list_patients))
        .route("/profile", get(meta::get_profile));

    let protected = uploader_routes
        .merge(reviewer_routes)
        .merge(shared_routes)
        .layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .fallback(route_not_found)
        .with_state(state)
}
