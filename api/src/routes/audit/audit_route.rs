use std::sync::Arc;

use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::audit::{audit_request::AuditRequest, audit_response::AuditResponse},
};

/// HTTP endpoint that audits one listing.
///
/// Expects `{ "input": "<item code or storefront URL>" }`. The per-client
/// allowance has already been consumed by the quota layer when this runs.
#[instrument(name = "audit_route", skip(state, headers, payload))]
pub async fn audit_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> AppResult<Response> {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    let Json(body) = payload?;
    let report = state.auditor.audit(&body.input).await?;

    info!(
        score = report.listing_score,
        sentiment = report.sentiment_summary.map(|l| l.as_str()).unwrap_or(""),
        "audit served"
    );

    Ok(ApiResponse::success(AuditResponse::from(report)).into_response_with_status(StatusCode::OK))
}
