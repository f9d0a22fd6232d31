use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod directory;
pub mod events;

pub use directory::{list_categories, list_organisations};
pub use events::{get_event, list_events, related_events, search_events};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    database: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match state.store.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            "down"
        }
    };

    let payload = HealthPayload {
        status: "ok",
        service: "charity-events-api",
        database,
    };

    success(payload, "Health check successful").into_response()
}

pub async fn not_found() -> Response {
    AppError::NotFound("Requested resource not found".to_string()).into_response()
}
