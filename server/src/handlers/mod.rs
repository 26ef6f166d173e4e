use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::state::AppState;
use crate::utils::response::{error, success};

pub mod dev_events;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "dev-events-api",
    };

    success(payload, "Health check successful")
}

/// Reports whether the backing store answers.
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    match state.store.ping().await {
        Ok(()) => success(
            HealthPayload {
                status: "ready",
                service: "dev-events-api",
            },
            "Store reachable",
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            error(
                "STORE_UNAVAILABLE",
                "The backing store is unavailable",
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}
