//! Axum router construction for the Jsondeck API.
//!
//! Every request lands on a single fallback handler, [`dispatch`], which
//! runs the resource routing from [`crate::route`] so that method and
//! path decisions stay in one place.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::uri::PathAndQuery;
use axum::http::{HeaderValue, Method, Uri};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::handlers;
use crate::response::Reply;
use crate::route::{RouteDecision, route};
use crate::state::AppState;

/// Build the complete Axum router.
///
/// Served paths:
/// - `/users`, `/users/{id}` -- user records keyed by `id`
/// - `/posts`, `/posts/{id}` -- post records keyed by `post_id`
///
/// Anything else is answered with 404 `Invalid endpoint`. Responses
/// carry `Access-Control-Allow-Origin: *`; preflight `OPTIONS` requests
/// are not short-circuited and get the same JSON replies as any other
/// method.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Route and answer one request.
///
/// A body that cannot be buffered is treated as empty, which makes
/// create and update fail with their generic 500 reply.
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Reply {
    let target = uri.path_and_query().map_or_else(|| uri.path(), PathAndQuery::as_str);
    info!(%method, target, "Request");

    let body = body.unwrap_or_else(|rejection| {
        warn!(%method, target, error = %rejection, "Failed to read request body");
        Bytes::new()
    });

    match route(&method, target) {
        RouteDecision::NotFound => ApiError::InvalidEndpoint.into_reply(),
        RouteDecision::Resource(resource_route) => {
            handlers::handle(state.store(), &resource_route, &body).await
        }
    }
}
