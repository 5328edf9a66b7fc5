use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `msg` carried by every 500 response body.
pub const INTERNAL_ERROR_MSG: &str = "Something went wrong";

// -------------------------
// Error body shapes
// -------------------------

/// A single field-level validation failure.
///
/// 400 responses carry a bare JSON array of these:
/// `[{"param": "org", "msg": "org is not valid", "value": "nope"}]`.
/// `value` is omitted when the offending input was absent rather than
/// malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            msg: msg.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Body shape of 404 and 500 responses: `{"msg": ...}`, plus an `err`
/// detail on 500s from endpoints that expose the underlying failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            err: None,
        }
    }

    #[must_use]
    pub fn with_err(mut self, err: impl Into<String>) -> Self {
        self.err = Some(err.into());
        self
    }
}

// -------------------------
// API errors
// -------------------------

/// High-level API errors, mapped onto the service's HTTP error contract
/// by the `IntoResponse` impl.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 with a JSON array of field errors.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    /// 404 with `{"msg": ...}`.
    #[error("{0}")]
    NotFound(String),
    /// 500 with `{"msg": "Something went wrong"}` and an optional `err`
    /// detail.
    #[error("internal server error")]
    Internal { err: Option<String> },
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    /// Single-field 400, the common case for path-parameter checks.
    pub fn invalid_param(error: FieldError) -> Self {
        Self::Validation(vec![error])
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// 500 that hides the underlying failure from the client.
    pub fn internal() -> Self {
        Self::Internal { err: None }
    }

    /// 500 that surfaces the underlying failure in the `err` field.
    pub fn internal_with(err: impl Into<String>) -> Self {
        Self::Internal {
            err: Some(err.into()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(errors) => serde_json::to_vec(errors),
            ApiError::NotFound(msg) => serde_json::to_vec(&ErrorBody::new(msg.clone())),
            ApiError::Internal { err } => {
                let mut body = ErrorBody::new(INTERNAL_ERROR_MSG);
                body.err = err.clone();
                serde_json::to_vec(&body)
            }
        };
        // Fallback minimal body if serialization fails
        let body = body.unwrap_or_else(|_| b"{}".to_vec());
        json_response(status, body)
    }
}

// -------------------------
// API response wrapper
// -------------------------

/// A serializable payload plus the status it ships with.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub value: T,
    pub status: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn new(value: T, status: StatusCode) -> Self {
        Self { value, status }
    }

    pub fn ok(value: T) -> Self {
        Self::new(value, StatusCode::OK)
    }

    pub fn created(value: T) -> Self {
        Self::new(value, StatusCode::CREATED)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.value) {
            Ok(body) => json_response(self.status, body),
            Err(_) => ApiError::internal().into_response(),
        }
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    axum::http::Response::builder()
        .status(status)
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )
        .body(axum::body::Body::from(body))
        .unwrap_or_else(|_| {
            axum::http::Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )
                .body(axum::body::Body::from("{}"))
                .expect("build fallback response")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn into_response_sets_status_and_content_type() {
        let resp = ApiError::not_found("Organisation not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, &HeaderValue::from_static("application/json"));
    }

    #[test]
    fn api_error_variants_map_to_status() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (
                ApiError::invalid_param(FieldError::new("org", "org is not valid")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::not_found("Result not found"),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::internal(), StatusCode::INTERNAL_SERVER_ERROR),
            (
                ApiError::internal_with("backend unreachable"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases.into_iter() {
            assert_eq!(err.status_code(), status);
        }
    }

    #[test]
    fn field_error_serializes_with_value() {
        let err = FieldError::new("org", "org is not valid").with_value("not-a-uuid");
        assert_json_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"param": "org", "msg": "org is not valid", "value": "not-a-uuid"})
        );
    }

    #[test]
    fn field_error_omits_absent_value() {
        let err = FieldError::new("sampleId", "sampleId is not valid");
        assert_json_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"param": "sampleId", "msg": "sampleId is not valid"})
        );
    }

    #[test]
    fn validation_body_is_a_bare_array() {
        let errors = vec![
            FieldError::new("org", "org is not valid").with_value("abc"),
            FieldError::new("profileId", "profileId is not valid"),
        ];
        assert_json_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!([
                {"param": "org", "msg": "org is not valid", "value": "abc"},
                {"param": "profileId", "msg": "profileId is not valid"}
            ])
        );
    }

    #[test]
    fn not_found_body_has_msg_only() {
        let body = ErrorBody::new("Profile not found");
        assert_json_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"msg": "Profile not found"})
        );
    }

    #[test]
    fn internal_body_carries_optional_err() {
        let bare = ErrorBody::new(INTERNAL_ERROR_MSG);
        assert_json_eq!(
            serde_json::to_value(&bare).unwrap(),
            json!({"msg": "Something went wrong"})
        );

        let detailed = ErrorBody::new(INTERNAL_ERROR_MSG).with_err("store offline");
        assert_json_eq!(
            serde_json::to_value(&detailed).unwrap(),
            json!({"msg": "Something went wrong", "err": "store offline"})
        );
    }

    #[test]
    fn error_body_round_trips() {
        let body: ErrorBody = serde_json::from_value(json!({"msg": "Result not found"})).unwrap();
        assert_eq!(body.msg, "Result not found");
        assert_eq!(body.err, None);
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_response_ok_sets_status_and_content_type() {
        let payload = json!({"data": []});
        let resp = ApiResponse::ok(payload).into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, &HeaderValue::from_static("application/json"));
    }

    #[test]
    fn api_response_created_sets_201() {
        let payload = json!({"data": {"id": "r1", "type": "sample"}});
        let resp = ApiResponse::created(payload).into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
