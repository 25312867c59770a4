use axum::{
    routing::{get, post},
    Router,
};
use slotwarden_core::WardenConfig;
use slotwarden_store::SlotStore;
use std::sync::Arc;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
///
/// Nothing here is mutable: all mutable state lives in the remote store,
/// and each request runs to completion on its own.
pub struct AppState {
    pub config: WardenConfig,
    pub store: Arc<dyn SlotStore>,
}

impl AppState {
    pub fn new(config: WardenConfig, store: Arc<dyn SlotStore>) -> Self {
        Self { config, store }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/update_slots", get(crate::http::slots::update_slots_handler))
        // Legacy alias kept for existing cron triggers.
        .route("/update_slot", get(crate::http::slots::update_slots_handler))
        .route("/lock_check", get(crate::http::slots::lock_check_handler))
        .route("/getData", get(crate::http::proxy::get_data_handler))
        .route("/setData", post(crate::http::proxy::set_data_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
