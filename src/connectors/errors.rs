use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;

/// Errors that can occur while talking to the remote chat app
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Service unreachable or timeout
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Response body does not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// The remote app reported a failure while running the prediction
    #[error("Remote error: {0}")]
    Remote(String),
    /// Internal error in connector
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConnectorError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "HttpError",
            Self::ServiceUnavailable(_) => "ServiceUnavailable",
            Self::InvalidResponse(_) => "InvalidResponse",
            Self::Remote(_) => "Remote",
            Self::Internal(_) => "Internal",
        }
    }

    /// Underlying error text without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::HttpError(msg)
            | Self::ServiceUnavailable(msg)
            | Self::InvalidResponse(msg)
            | Self::Remote(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

// Callers only ever see a generic server error carrying the underlying text;
// the kind goes to the log.
impl ResponseError for ConnectorError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "detail": self.message(),
        }))
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}
