use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const INVALID_EMAIL_MESSAGE: &str = "Valid email is required";
pub const CONFIGURATION_MESSAGE: &str = "Server configuration error";
pub const UPSTREAM_MESSAGE: &str = "Failed to subscribe to waitlist";
pub const INTERNAL_MESSAGE: &str = "Internal server error";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MethodNotAllowed,
    PayloadTooLarge,
    Validation,
    Configuration,
    Upstream,
    Internal,
}

impl ErrorCode {
    /// HTTP status the subscription endpoint answers with for this code.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::MethodNotAllowed => 405,
            ErrorCode::PayloadTooLarge => 413,
            ErrorCode::Validation => 400,
            ErrorCode::Configuration | ErrorCode::Upstream | ErrorCode::Internal => 500,
        }
    }
}

/// Error body as it travels over the wire: `{ "error": ..., "details": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiException {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    pub fn method_not_allowed() -> Self {
        Self::new(ErrorCode::MethodNotAllowed, METHOD_NOT_ALLOWED_MESSAGE)
    }

    pub fn payload_too_large() -> Self {
        Self::new(ErrorCode::PayloadTooLarge, PAYLOAD_TOO_LARGE_MESSAGE)
    }

    pub fn invalid_email() -> Self {
        Self::new(ErrorCode::Validation, INVALID_EMAIL_MESSAGE)
    }

    pub fn configuration() -> Self {
        Self::new(ErrorCode::Configuration, CONFIGURATION_MESSAGE)
    }

    pub fn upstream(details: Option<Value>) -> Self {
        Self::new(ErrorCode::Upstream, UPSTREAM_MESSAGE).with_details(details)
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::Internal, INTERNAL_MESSAGE)
    }
}

impl From<ApiException> for ApiError {
    fn from(value: ApiException) -> Self {
        Self {
            error: value.message,
            details: value.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_absent_details() {
        let body = serde_json::to_value(ApiError::from(ApiException::invalid_email())).expect("json");
        assert_eq!(body, serde_json::json!({ "error": "Valid email is required" }));
    }

    #[test]
    fn upstream_error_keeps_provider_details() {
        let details = serde_json::json!({ "errors": [{ "code": "invalid" }] });
        let body = serde_json::to_value(ApiError::from(ApiException::upstream(Some(details.clone()))))
            .expect("json");
        assert_eq!(body["error"], "Failed to subscribe to waitlist");
        assert_eq!(body["details"], details);
    }

    #[test]
    fn codes_map_to_contract_statuses() {
        assert_eq!(ErrorCode::MethodNotAllowed.http_status(), 405);
        assert_eq!(ErrorCode::PayloadTooLarge.http_status(), 413);
        assert_eq!(ErrorCode::Validation.http_status(), 400);
        assert_eq!(ErrorCode::Configuration.http_status(), 500);
        assert_eq!(ErrorCode::Upstream.http_status(), 500);
        assert_eq!(ErrorCode::Internal.http_status(), 500);
    }
}
