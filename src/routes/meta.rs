use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::{
    auth::SessionClaims,
    error::{AppResult, OptionExt},
    records::RecordScope,
    state::AppState,
    types::{Envelope, Role},
};

fn scope_for(session: &SessionClaims) -> RecordScope {
    match session.role {
        Role::Reviewer => RecordScope::All,
        Role::Uploader => RecordScope::Owner(session.sub),
    }
}

/// Distinct region values across all records, for filter dropdowns. Not
/// scoped: region names carry no patient data.
pub async fn list_regions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let regions = state.scans.distinct_regions().await?;
    Ok(Json(Envelope::new("success", regions)))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
) -> AppResult<impl IntoResponse> {
    let stats = state.scans.stats(scope_for(&session)).await?;
    Ok(Json(Envelope::new("success", stats)))
}

pub async fn list_patients(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
) -> AppResult<impl IntoResponse> {
    let patients = state.scans.patients(scope_for(&session)).await?;
    Ok(Json(Envelope::new("success", patients)))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
) -> AppResult<impl IntoResponse> {
    let account =
        state.credentials.find_by_id(session.sub).await?.ok_or_not_found("Account")?;
    Ok(Json(Envelope::new("success", account.summary())))
}
