pub mod appointments;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/appointments", get(appointments::list_appointments))
        .route(
            "/api/appointments/month",
            get(appointments::list_month_appointments),
        )
        .route("/api/appointments/add", post(appointments::add_appointment))
        .route(
            "/api/appointments/update",
            post(appointments::update_appointment),
        )
        .route(
            "/api/appointments/reset",
            post(appointments::reset_appointments),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
