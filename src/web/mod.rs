//! HTTP surface: routes, extractors and response mapping.

pub mod extract;
pub mod handlers;
pub mod response;

use std::any::Any;

use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::views::json::ActionResult;

/// Shared per-request state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub page_size: i64,
}

impl AppState {
    pub fn new(db: Database, page_size: i64) -> Self {
        Self { db, page_size }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/clients", get(handlers::index))
        .route("/clients/delete", post(handlers::delete_client))
        .route(
            "/clients/edit",
            get(handlers::edit_client_form).post(handlers::edit_client),
        )
        .route(
            "/clients/edit-address",
            get(handlers::edit_address_form).post(handlers::edit_address),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(_payload: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    response::json(
        StatusCode::INTERNAL_SERVER_ERROR,
        ActionResult::failed(response::UNEXPECTED),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("handler failed")
    }

    #[tokio::test]
    async fn panicking_handler_becomes_generic_500() {
        let app = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "message": "An unexpected error occurred." })
        );
    }
}
