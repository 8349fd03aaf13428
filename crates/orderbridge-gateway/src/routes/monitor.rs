//! Deprecation monitoring endpoint.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use orderbridge_proto::vocab::V1_ORDERS_PATH;
use orderbridge_proto::ApiRequest;

use crate::error::AppError;
use crate::json::MonitorResponse;
use crate::AppState;

/// Monitoring routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/monitor/v1/orders", get(monitor_v1_orders))
}

/// Probe the v1 endpoint and classify the answer.
async fn monitor_v1_orders(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<MonitorResponse>, AppError> {
    let request = ApiRequest::get(V1_ORDERS_PATH).with_query_map(query);
    let upstream = state.upstream.fetch(&request).await?;
    let signal = state.classifier.classify(upstream.status, &upstream.body);

    if signal.is_alerting() {
        tracing::warn!(status = upstream.status, %signal, "v1 orders endpoint alerting");
    }

    Ok(Json(MonitorResponse {
        signal,
        status_code: upstream.status,
    }))
}
