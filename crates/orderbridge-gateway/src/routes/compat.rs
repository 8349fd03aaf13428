//! Legacy-compatible orders endpoint.
//!
//! v1 clients call this instead of the retired v1 API. The request is
//! forwarded to v2 and the answer is reshaped into the v1 contract.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use orderbridge_core::{normalize, translate_document};
use orderbridge_proto::vocab::V2_ORDERS_PATH;
use orderbridge_proto::ApiRequest;

use crate::error::AppError;
use crate::AppState;

/// Compatibility routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/compat/orders", get(compat_orders))
}

/// Fetch a v2 order and answer in the v1 shape.
async fn compat_orders(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    let request = ApiRequest::get(V2_ORDERS_PATH).with_query_map(query);
    let upstream = state.upstream.fetch(&request).await?;

    if upstream.is_ok() {
        return Ok(Json(translate_document(&upstream.body)).into_response());
    }

    let status = StatusCode::from_u16(upstream.status).map_err(|_| {
        AppError::Upstream(format!("upstream returned invalid status {}", upstream.status))
    })?;
    let envelope = normalize(upstream.status, &upstream.body);
    tracing::debug!(
        status = upstream.status,
        error = %envelope.error,
        "normalized upstream error"
    );

    Ok((status, Json(envelope)).into_response())
}
