//! Axum route handlers for the question bank API.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::banks::service::DashboardStats;
use crate::errors::AppError;
use crate::layout::export_async;
use crate::models::bank::{BankDraft, BankSummary, QuestionBank};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BankListResponse {
    pub banks: Vec<BankSummary>,
}

/// GET /api/v1/banks?q=
pub async fn handle_list_banks(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<BankListResponse>, AppError> {
    let banks = state.banks.list_banks(params.q.as_deref()).await?;
    Ok(Json(BankListResponse { banks }))
}

/// GET /api/v1/banks/stats
pub async fn handle_dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.banks.dashboard_stats().await?))
}

/// GET /api/v1/banks/:id
pub async fn handle_get_bank(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuestionBank>, AppError> {
    Ok(Json(state.banks.get_bank(&id).await?))
}

/// POST /api/v1/banks
pub async fn handle_create_bank(
    State(state): State<AppState>,
    Json(draft): Json<BankDraft>,
) -> Result<(StatusCode, Json<QuestionBank>), AppError> {
    let bank = state.banks.create_bank(draft).await?;
    Ok((StatusCode::CREATED, Json(bank)))
}

/// PUT /api/v1/banks/:id
pub async fn handle_update_bank(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<BankDraft>,
) -> Result<Json<QuestionBank>, AppError> {
    Ok(Json(state.banks.update_bank(&id, draft).await?))
}

/// DELETE /api/v1/banks/:id
pub async fn handle_delete_bank(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.banks.delete_bank(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/banks/:id/export
///
/// Streams the bank as a PDF attachment named after the bank.
pub async fn handle_export_bank(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let bank = state.banks.get_bank(&id).await?;

    let exported = export_async(Some(bank), &state.page_config)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("export produced no document")))?;

    let disposition = content_disposition(&exported.file_name)?;
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, Bytes::from(exported.bytes)).into_response())
}

/// RFC 5987 `attr-char`: everything else in an extended parameter value is
/// percent-encoded.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// RFC 6266 attachment header. `filename` is an ASCII fallback with quotes,
/// backslashes and non-ASCII replaced by `_`; `filename*` carries the exact
/// UTF-8 name.
fn content_disposition(file_name: &str) -> Result<HeaderValue, AppError> {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    let encoded = utf8_percent_encode(file_name, ATTR_CHAR);

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}"
    ))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid Content-Disposition: {e}")))
}
