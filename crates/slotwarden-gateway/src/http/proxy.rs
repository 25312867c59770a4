//! Secret-gated passthrough — GET /getData and POST /setData.
//!
//! Hides the store URL behind the gateway: callers present the shared
//! secret in the X-Secret header and read or overwrite the whole tree.
//! A mismatch is rejected before any store call, and error bodies never
//! echo the store URL or its data.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, warn};

use crate::app::AppState;

type ProxyRejection = (StatusCode, Json<Value>);

/// Constant-shape secret check shared by both routes.
///
/// An empty configured secret rejects everything rather than turning
/// the gate off.
fn check_secret(headers: &HeaderMap, expected: &str) -> Result<(), ProxyRejection> {
    let presented = headers.get("x-secret").and_then(|v| v.to_str().ok());
    if expected.is_empty() || presented != Some(expected) {
        warn!("proxy request rejected: X-Secret mismatch");
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Unauthorized"})),
        ));
    }
    Ok(())
}

/// GET /getData — fetch the entire store root.
pub async fn get_data_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ProxyRejection> {
    check_secret(&headers, &state.config.proxy.secret)?;

    match state.store.fetch_root().await {
        Ok(root) => Ok(Json(root.unwrap_or(Value::Null))),
        Err(e) => {
            error!(error = %e, "proxy read failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to read DB"})),
            ))
        }
    }
}

/// POST /setData — overwrite the entire store root with the body.
pub async fn set_data_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ProxyRejection> {
    check_secret(&headers, &state.config.proxy.secret)?;

    match state.store.put_root(&body).await {
        Ok(()) => Ok(Json(json!({"status": "ok"}))),
        Err(e) => {
            error!(error = %e, "proxy write failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to write DB"})),
            ))
        }
    }
}
