use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error response: a status plus the body the client sees.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    body: serde_json::Value,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, detail: Option<String>) -> Self {
        let body = match detail {
            Some(detail) => json!({"error": error, "detail": detail}),
            None => json!({"error": error}),
        };
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode { self.status }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::Validation(v) => Self {
                status: StatusCode::BAD_REQUEST,
                body: json!({"errors": v.violations}),
            },
            ServiceError::MalformedInput(_) => Self {
                status: StatusCode::BAD_REQUEST,
                body: json!({"error": e.to_string()}),
            },
            ServiceError::NotFound { id } => Self {
                status: StatusCode::NOT_FOUND,
                body: json!({"error": "not found", "id": id}),
            },
            ServiceError::Store(_) => {
                error!(code = e.code(), error = %e, "asset store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot open asset store: {0}")]
    Store(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ValidationError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::MalformedInput("EOF".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::Validation(ValidationError::new(vec!["name is a required field".into()])),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::not_found("a1"), StatusCode::NOT_FOUND),
            (ServiceError::store("disk full"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status(), status);
        }
    }

    #[test]
    fn validation_body_lists_every_violation() {
        let err = JsonApiError::from(ServiceError::Validation(ValidationError::new(vec![
            "name is a required field".into(),
            "serialNo is a required field".into(),
        ])));
        assert_eq!(err.body, json!({"errors": ["name is a required field", "serialNo is a required field"]}));
    }

    #[test]
    fn malformed_body_quotes_parser_message() {
        let err = JsonApiError::from(ServiceError::MalformedInput("EOF while parsing".into()));
        assert_eq!(err.body, json!({"error": "invalid request body format: \"EOF while parsing\""}));
    }

    #[test]
    fn store_failure_hides_backend_detail() {
        let detail = "/var/lib/assets/assets.json: Permission denied (os error 13)";
        let err = JsonApiError::from(ServiceError::store(detail));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body, json!({"error": "Internal Server Error"}));
    }
}
