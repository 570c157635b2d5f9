use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::gemini::{FailureKind, GeminiError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or missing request fields.
    #[error("{0}")]
    BadRequest(String),

    #[error("Classifier error: {0}")]
    Classifier(#[from] GeminiError),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Classifier(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the HTTP client in the `error` field.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::BadRequest(message) => message.clone(),
            ServiceError::Classifier(e) => match e.kind() {
                FailureKind::Configuration => e.to_string(),
                FailureKind::Transport => format!(
                    "Failed to connect to AI model or AI model returned an error: {e}"
                ),
                FailureKind::Parse => {
                    "Failed to parse AI model response. Unexpected structure.".to_string()
                }
                FailureKind::Decode => {
                    format!("Failed to decode AI model response. It might not be JSON: {e}")
                }
            },
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ServiceError::BadRequest(message) => warn!(%message, "rejecting request"),
            ServiceError::Classifier(e) => error!(kind = %e.kind(), error = %e, "classification failed"),
        }
        let body = serde_json::json!({ "error": self.client_message() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let err = ServiceError::bad_request("Request must be JSON");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Request must be JSON");
    }

    #[test]
    fn missing_key_maps_to_500_with_configuration_message() {
        let err = ServiceError::from(GeminiError::MissingApiKey);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.client_message().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn upstream_failures_have_kind_specific_messages() {
        let api = ServiceError::from(GeminiError::Api {
            status: 502,
            snippet: "bad gateway".into(),
        });
        assert!(api
            .client_message()
            .starts_with("Failed to connect to AI model or AI model returned an error"));

        let parse = ServiceError::from(GeminiError::Parse("no candidates".into()));
        assert_eq!(
            parse.client_message(),
            "Failed to parse AI model response. Unexpected structure."
        );

        let decode = ServiceError::from(GeminiError::Decode("expected value".into()));
        assert!(decode
            .client_message()
            .starts_with("Failed to decode AI model response. It might not be JSON"));
    }
}
