//! Shared JSON envelope and error plumbing for the HTTP handlers.

use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nestling_core::errors::{ApplicationError, DomainError, InterfaceError};
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub error: String,
}

pub fn correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

impl ApiError {
    pub fn domain(error: DomainError, correlation_id: &str) -> Self {
        Self(ApplicationError::from(error).into_interface(correlation_id))
    }

    pub fn rejected(rejection: JsonRejection, correlation_id: &str) -> Self {
        Self(InterfaceError::BadRequest {
            message: format!("Invalid JSON body: {}", rejection.body_text()),
            correlation_id: correlation_id.to_owned(),
        })
    }

    pub fn status(&self) -> StatusCode {
        match self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(
            event_name = "api.request.rejected",
            correlation_id = self.0.correlation_id(),
            status = status.as_u16(),
            error = %self.0,
            "request rejected"
        );

        let body = ApiFailure { success: false, error: self.0.public_message() };
        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into the same opaque 500 envelope as other faults.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    let interface = ApplicationError::Internal(detail.to_owned()).into_interface(correlation_id());
    error!(
        event_name = "api.request.panicked",
        correlation_id = interface.correlation_id(),
        detail,
        "handler panicked"
    );

    let body = ApiFailure { success: false, error: interface.public_message() };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use nestling_core::errors::DomainError;

    use super::{panic_response, ApiError};

    #[test]
    fn domain_errors_are_bad_requests() {
        let error = ApiError::domain(DomainError::missing(&["price"]), "req-1");

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.0.public_message(), "Missing required fields: price");
        assert_eq!(error.0.correlation_id(), "req-1");
    }

    #[test]
    fn panics_become_opaque_internal_errors() {
        let response = panic_response(Box::new("catalog exploded"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_response_uses_its_status() {
        let response =
            ApiError::domain(DomainError::invalid("price", "must not be negative"), "req-2")
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
