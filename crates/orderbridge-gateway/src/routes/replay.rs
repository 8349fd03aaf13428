//! Fixture replay fallback.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use orderbridge_proto::ApiRequest;

use crate::error::AppError;
use crate::AppState;

/// Answer any unrouted request from the fixture table.
pub async fn replay(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    let request = ApiRequest::new(method.as_str(), uri.path()).with_query_map(query);

    let response = state
        .fixtures
        .lookup(&request)
        .ok_or_else(|| AppError::NotFound(format!("no fixture for {}", request)))?;

    let status = StatusCode::from_u16(response.status)
        .map_err(|_| AppError::Internal(format!("fixture status {} is invalid", response.status)))?;

    Ok((status, Json(response.body.clone())).into_response())
}
