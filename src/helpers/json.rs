use actix_web::error::{Error, InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_derive::Serialize;

/// `{"status": ..., "message": ...}` body used by the liveness endpoints
#[derive(Debug, Serialize)]
pub struct JsonStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JsonStatus {
    pub fn ok(message: &str) -> Self {
        Self {
            status: "ok",
            message: Some(message.to_string()),
        }
    }

    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            message: None,
        }
    }
}

/// `{"detail": ...}` error body
#[derive(Debug, Serialize)]
pub struct JsonDetail {
    pub detail: String,
}

impl JsonDetail {
    fn error(status: StatusCode, detail: String, fallback: &str) -> Error {
        let detail = if detail.trim().is_empty() {
            fallback.to_string()
        } else {
            detail
        };
        let response = HttpResponse::build(status).json(JsonDetail {
            detail: detail.clone(),
        });
        InternalError::from_response(detail, response).into()
    }

    pub fn unprocessable_entity<M: Into<String>>(detail: M) -> Error {
        Self::error(
            StatusCode::UNPROCESSABLE_ENTITY,
            detail.into(),
            "Validation error",
        )
    }

    pub fn payload_too_large<M: Into<String>>(detail: M) -> Error {
        Self::error(
            StatusCode::PAYLOAD_TOO_LARGE,
            detail.into(),
            "Payload too large",
        )
    }
}

/// Turns extractor failures (bad JSON, wrong types, missing fields) into 422;
/// bodies over the size limit get 413.
pub fn json_payload_error(err: JsonPayloadError) -> Error {
    if let JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } = &err {
        tracing::debug!(error = %err, "Rejected oversized chat payload");
        return JsonDetail::payload_too_large(err.to_string());
    }

    let detail = match &err {
        JsonPayloadError::Deserialize(err) => format!(
            "deserialize error at line {}, column {}: {}",
            err.line(),
            err.column(),
            err
        ),
        JsonPayloadError::ContentType => "expected a JSON body (Content-Type: application/json)".to_string(),
        other => other.to_string(),
    };
    tracing::debug!(detail = %detail, "Rejected chat payload");
    JsonDetail::unprocessable_entity(detail)
}
