//! Scheduler entry points — GET /update_slots (alias /update_slot) and
//! GET /lock_check.
//!
//! Both are driven by external cron triggers and always answer 200 with
//! a plain-text summary: a store outage means the pass did less than
//! intended, and the body says so. Each invocation is independently
//! idempotent — re-running when nothing is due mutates nothing.

use axum::extract::State;
use slotwarden_core::time::now_ist;
use slotwarden_engine::{check_and_lock, shift_due_slots};
use std::sync::Arc;
use tracing::error;

use crate::app::AppState;

/// GET /update_slots — evaluate every slot and shift the due ones.
pub async fn update_slots_handler(State(state): State<Arc<AppState>>) -> String {
    match shift_due_slots(state.store.as_ref(), now_ist()).await {
        Ok(report) if report.shifted.is_empty() => "No slots due for shift.\n".to_string(),
        Ok(report) => format!(
            "Shifted {} slot(s): {}. Locked {} credential(s).\n",
            report.shifted.len(),
            report.shifted.join(", "),
            report.locked,
        ),
        Err(e) => {
            error!(error = %e, "slot shift pass failed");
            "Slot store unreachable; nothing shifted.\n".to_string()
        }
    }
}

/// GET /lock_check — sweep when any enabled slot nears its end.
pub async fn lock_check_handler(State(state): State<Arc<AppState>>) -> String {
    match check_and_lock(state.store.as_ref(), now_ist()).await {
        Ok(0) => "Not time to lock yet.\n".to_string(),
        Ok(n) => format!("Locked {n} credential(s).\n"),
        Err(e) => {
            error!(error = %e, "lock check failed");
            "Slot store unreachable; nothing locked.\n".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::proxy::tests::test_router;

    #[tokio::test]
    async fn update_slots_is_200_even_when_store_is_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let app = test_router(&server, "s3cret").await;
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/update_slots")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("unreachable"));
    }

    #[tokio::test]
    async fn update_slot_alias_reports_no_due_slots() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/settings/slots.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "slot_1": { "enabled": false },
            })))
            .mount(&server)
            .await;

        let app = test_router(&server, "s3cret").await;
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/update_slot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("No slots due"));
    }

    #[tokio::test]
    async fn lock_check_reports_not_time_yet() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/settings/slots.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "slot_1": { "enabled": true, "slot_end": "2999-01-01 09:00:00" },
            })))
            .mount(&server)
            .await;
        // Far-future slot end: the sweep must not fetch the root.
        Mock::given(method("GET"))
            .and(path("/.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .expect(0)
            .mount(&server)
            .await;

        let app = test_router(&server, "s3cret").await;
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/lock_check")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("Not time to lock"));
    }
}
