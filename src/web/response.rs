//! Mapping of outcomes onto status codes and bodies in either representation.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{Entity, ServiceError};
use crate::views::html;
use crate::views::json::ActionResult;

use super::extract::Representation;

pub const UNEXPECTED: &str = "An unexpected error occurred.";

pub fn json<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

pub fn page(status: StatusCode, body: String) -> Response {
    (status, Html(body)).into_response()
}

/// Where an HTML form lands after a successful mutation.
pub fn back_to_index() -> Response {
    Redirect::to("/").into_response()
}

fn failure(representation: Representation, status: StatusCode, title: &str, message: &str) -> Response {
    match representation {
        Representation::Json => json(status, ActionResult::failed(message)),
        Representation::Html => page(status, html::message_page(title, message)),
    }
}

pub fn not_found(representation: Representation, entity: Entity) -> Response {
    failure(
        representation,
        StatusCode::NOT_FOUND,
        "Not Found",
        &format!("{entity} not found"),
    )
}

/// A request without a usable id. HTML callers get a plain not-found page.
pub fn missing_id(representation: Representation, entity: Entity) -> Response {
    match representation {
        Representation::Json => json(
            StatusCode::BAD_REQUEST,
            ActionResult::failed(format!("{entity} ID is null")),
        ),
        Representation::Html => not_found(representation, entity),
    }
}

pub fn bad_request(representation: Representation, message: &str) -> Response {
    failure(representation, StatusCode::BAD_REQUEST, "Bad Request", message)
}

pub fn unexpected(representation: Representation) -> Response {
    failure(
        representation,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error",
        UNEXPECTED,
    )
}

/// Fallback mapping for service failures a handler did not handle itself.
pub fn service_error(representation: Representation, err: ServiceError) -> Response {
    match err {
        ServiceError::NotFound(entity) => not_found(representation, entity),
        ServiceError::Validation(errors) => match representation {
            Representation::Json => json(
                StatusCode::UNPROCESSABLE_ENTITY,
                ActionResult::invalid(errors),
            ),
            Representation::Html => page(
                StatusCode::UNPROCESSABLE_ENTITY,
                html::message_page("Invalid data", &errors.to_string()),
            ),
        },
        ServiceError::QueryFailed(_) | ServiceError::Storage(_) => unexpected(representation),
    }
}
