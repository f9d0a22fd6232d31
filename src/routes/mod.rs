use axum::middleware::map_response_with_state;
use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::config::{
    create_cors_layer, create_no_cache_layer, create_security_headers_layer, create_trace_layer,
    Config,
};
use crate::handlers::{
    get_event, health_check, list_categories, list_events, list_organisations, not_found,
    related_events, search_events,
};
use crate::state::AppState;
use crate::utils::error::{redact_internal_errors, PanicResponder};

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let environment = config.environment;

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/events",
            get(list_events).layer(create_no_cache_layer()),
        )
        .route(
            "/api/events/search",
            get(search_events).layer(create_no_cache_layer()),
        )
        .route("/api/events/:id", get(get_event))
        .route("/api/events/:id/related", get(related_events))
        .route(
            "/api/categories",
            get(list_categories).layer(create_no_cache_layer()),
        )
        .route("/api/organisations", get(list_organisations))
        .fallback(not_found)
        .with_state(state)
        .layer(map_response_with_state(environment, redact_internal_errors))
        .layer(CatchPanicLayer::custom(PanicResponder::new(environment)))
        .layer(create_trace_layer())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(create_security_headers_layer(environment))
        .layer(create_cors_layer(config.cors_allowed_origins.as_deref()))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
