/**
 * Router Configuration
 *
 * Merges the resource route tables and wraps the whole surface in the
 * ambient layers: request tracing, and a panic catcher so that even a
 * panicking stage produces the generic 500 from the error funnel instead
 * of tearing down the connection.
 */

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::resources::{post, user};
use crate::server::state::AppState;

/// Create the application router with all routes and layers configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(post::routes::routes())
        .merge(user::routes::routes())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "route not found" })),
    )
        .into_response()
}

/// A panic inside a handler is an unexpected fault; it funnels to the same
/// generic 500 as any other system failure.
fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::system("request handler panicked").into_response()
}
