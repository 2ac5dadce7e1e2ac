use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::{header, request::Parts, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::forms::FormShape;

/// How the caller wants the response rendered, read from `Accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Html,
    Json,
}

impl Representation {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|value| value.contains(mime::APPLICATION_JSON.essence_str()));

        if wants_json {
            Representation::Json
        } else {
            Representation::Html
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Representation
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Representation::from_headers(&parts.headers))
    }
}

fn has_json_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|content_type| {
            content_type.type_() == mime::APPLICATION
                && (content_type.subtype() == mime::JSON
                    || content_type.suffix().is_some_and(|suffix| suffix == mime::JSON))
        })
}

/// A submitted record, read from a JSON body or an urlencoded form.
#[derive(Debug, Clone)]
pub struct Submitted<T>(pub T);

#[derive(Debug, thiserror::Error)]
pub enum BodyRejection {
    #[error("request body is empty")]
    Missing,
    #[error("request body is malformed: {0}")]
    Malformed(String),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Submitted<T>
where
    S: Send + Sync,
    T: FormShape + DeserializeOwned + Send,
    T::Form: DeserializeOwned + Send,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if has_json_body(req.headers()) {
            let Json(value) = Json::<Option<T>>::from_request(req, state)
                .await
                .map_err(|rejection| BodyRejection::Malformed(rejection.body_text()))?;
            return value.map(Submitted).ok_or(BodyRejection::Missing);
        }

        let Form(form) = Form::<T::Form>::from_request(req, state)
            .await
            .map_err(|rejection| BodyRejection::Malformed(rejection.body_text()))?;
        Ok(Submitted(form.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: header::HeaderName, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn json_is_chosen_only_when_accepted() {
        assert_eq!(
            Representation::from_headers(&headers(header::ACCEPT, "application/json")),
            Representation::Json
        );
        assert_eq!(
            Representation::from_headers(&headers(
                header::ACCEPT,
                "text/html, application/json;q=0.9"
            )),
            Representation::Json
        );
        assert_eq!(
            Representation::from_headers(&headers(header::ACCEPT, "text/html")),
            Representation::Html
        );
        assert_eq!(Representation::from_headers(&HeaderMap::new()), Representation::Html);
    }

    #[test]
    fn json_bodies_are_recognized_by_content_type() {
        assert!(has_json_body(&headers(header::CONTENT_TYPE, "application/json")));
        assert!(has_json_body(&headers(
            header::CONTENT_TYPE,
            "application/json; charset=utf-8"
        )));
        assert!(!has_json_body(&headers(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded"
        )));
        assert!(!has_json_body(&HeaderMap::new()));
    }
}
