use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, MakeUuidRequestId};

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", post(handlers::search))
        .route("/results", get(handlers::results))
        .route("/last-search", post(handlers::save_last_search))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeUuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

/// JSON routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", get(handlers::api_recommendations))
        .layer(CorsLayer::permissive())
}
