use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    auth::SessionClaims,
    error::{AppResult, OptionExt},
    records::PageRequest,
    state::AppState,
    types::{Envelope, ScanPayload},
};

#[derive(Debug, Default, serde::Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub region: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn create_scan(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    Json(payload): Json<ScanPayload>,
) -> AppResult<impl IntoResponse> {
    let record = state.scans.create(session.sub, &payload).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new("Scan uploaded successfully", record))))
}

pub async fn list_scans(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = PageRequest { page: query.page, limit: query.limit };
    let (records, meta) = state.queries.list(&session, query.search, query.region, page).await?;
    Ok(Json(Envelope::paginated("success", records, meta)))
}

pub async fn get_scan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let record = state.scans.get_with_uploader(id).await?.ok_or_not_found("Scan")?;
    Ok(Json(Envelope::new("success", record)))
}

pub async fn list_my_scans(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = PageRequest { page: query.page, limit: query.limit };
    let (records, meta) = state.queries.list(&session, query.search, query.region, page).await?;
    Ok(Json(Envelope::paginated("success", records, meta)))
}

pub async fn update_scan(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    Path(id): Path<i64>,
    Json(payload): Json<ScanPayload>,
) -> AppResult<impl IntoResponse> {
    let record = state.scans.update(id, session.sub, &payload).await?;
    Ok(Json(Envelope::new("Scan updated successfully", record)))
}

pub async fn delete_scan(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.scans.delete(id, session.sub).await?;
    Ok(Json(Envelope::message_only("Scan deleted successfully")))
}
