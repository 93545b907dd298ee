//! The JSON response envelope.
//!
//! Every response body has the shape
//!
//! ```json
//! { "error": "<reason phrase>", "message": "<text>", "<payload key>": ... }
//! ```
//!
//! where `error` is the canonical reason phrase of the status code (`OK`
//! for successes) and the payload key is optional.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

/// A fully decided response: status, message, optional payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status: StatusCode,
    message: String,
    payload: Option<(&'static str, Value)>,
}

impl Reply {
    /// A reply without payload.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            payload: None,
        }
    }

    /// `200 OK` with the given message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message)
    }

    /// Attach a payload under `key`.
    #[must_use]
    pub fn with_payload(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.payload = Some((key, value.into()));
        self
    }

    /// The HTTP status.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The payload key and value, if any.
    pub fn payload(&self) -> Option<(&'static str, &Value)> {
        self.payload.as_ref().map(|(key, value)| (*key, value))
    }

    /// Render the envelope.
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            String::from("error"),
            Value::from(self.status.canonical_reason().unwrap_or("Unknown")),
        );
        body.insert(String::from("message"), Value::from(self.message.as_str()));
        if let Some((key, value)) = &self.payload {
            body.insert((*key).to_owned(), value.clone());
        }
        Value::Object(body)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_carries_reason_phrase_and_message() {
        let reply = Reply::new(StatusCode::NOT_FOUND, "Invalid endpoint");
        assert_eq!(
            reply.body(),
            json!({"error": "Not Found", "message": "Invalid endpoint"})
        );
    }

    #[test]
    fn payload_is_added_after_message() {
        let reply = Reply::new(StatusCode::CREATED, "User created")
            .with_payload("newUser", json!({"id": 1}));
        let body = reply.body();
        let keys: Vec<&str> = body.as_object().map_or_else(Vec::new, |object| {
            object.keys().map(String::as_str).collect()
        });
        assert_eq!(keys, ["error", "message", "newUser"]);
        assert_eq!(body["error"], "Created");
        assert_eq!(body["newUser"]["id"], 1);
    }

    #[test]
    fn into_response_is_json() {
        let response = Reply::ok("Getting all users").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").map(|v| v.to_str());
        assert!(matches!(content_type, Some(Ok("application/json"))));
    }
}
