use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::dev_events::{
    create_dev_event, create_speaker, delete_dev_event, get_dev_event, list_dev_events,
    update_dev_event, DEV_EVENTS_PATH,
};
use crate::handlers::{health_check, readiness_check};
use crate::state::AppState;

pub fn dev_event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_dev_events).post(create_dev_event))
        .route(
            "/:id",
            get(get_dev_event)
                .put(update_dev_event)
                .delete(delete_dev_event),
        )
        .route("/:id/speakers", post(create_speaker))
}

pub fn create_routes(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest(DEV_EVENTS_PATH, dev_event_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(config.production))
        .layer(create_cors_layer(&config.cors_allowed_origins))
}
