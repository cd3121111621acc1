use auth::TokenError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;

pub mod current_user;
pub mod forgot_password;
pub mod login_user;
pub mod register_user;
pub mod reset_password;

const INVALID_REQUEST: &str = "Invalid request";
const INVALID_TOKEN: &str = "Invalid or expired token";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Client-facing error.
///
/// Messages are deliberately generic; the underlying cause is logged where
/// the error is converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Rejected request body");
        Self::BadRequest(INVALID_REQUEST.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(_) | AccountError::InvalidEmail(_) => {
                tracing::warn!(error = %err, "Request validation failed");
                ApiError::BadRequest(INVALID_REQUEST.to_string())
            }
            AccountError::DuplicateEmail(_) => {
                ApiError::Conflict("User with this email already exists".to_string())
            }
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AccountError::Token(TokenError::SigningFailed(_)) => {
                tracing::error!(error = %err, "Token issuance failed");
                ApiError::InternalServerError(INTERNAL_ERROR.to_string())
            }
            AccountError::Token(_) | AccountError::TokenAlreadyUsed => {
                tracing::warn!(error = %err, "Token rejected");
                ApiError::BadRequest(INVALID_TOKEN.to_string())
            }
            AccountError::EmailMismatch => ApiError::BadRequest("Invalid email".to_string()),
            AccountError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            AccountError::CorruptHash(_) | AccountError::Password(_) | AccountError::Store(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError(INTERNAL_ERROR.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Body of endpoints that only report an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenPurpose;

    use super::*;
    use crate::account::errors::EmailError;

    #[test]
    fn test_error_mapping() {
        let cases = vec![
            (
                AccountError::Validation("empty".into()),
                ApiError::BadRequest(INVALID_REQUEST.into()),
            ),
            (
                AccountError::InvalidEmail(EmailError::Empty),
                ApiError::BadRequest(INVALID_REQUEST.into()),
            ),
            (
                AccountError::DuplicateEmail("a@example.com".into()),
                ApiError::Conflict("User with this email already exists".into()),
            ),
            (
                AccountError::InvalidCredentials,
                ApiError::Unauthorized("Invalid email or password".into()),
            ),
            (
                AccountError::Token(TokenError::InvalidSignature),
                ApiError::BadRequest(INVALID_TOKEN.into()),
            ),
            (
                AccountError::Token(TokenError::PurposeMismatch {
                    expected: TokenPurpose::PasswordReset,
                    actual: TokenPurpose::Access,
                }),
                ApiError::BadRequest(INVALID_TOKEN.into()),
            ),
            (
                AccountError::TokenAlreadyUsed,
                ApiError::BadRequest(INVALID_TOKEN.into()),
            ),
            (
                AccountError::EmailMismatch,
                ApiError::BadRequest("Invalid email".into()),
            ),
            (
                AccountError::UserNotFound("a@example.com".into()),
                ApiError::NotFound("User not found".into()),
            ),
            (
                AccountError::Token(TokenError::SigningFailed("key".into())),
                ApiError::InternalServerError(INTERNAL_ERROR.into()),
            ),
            (
                AccountError::Store("connection reset".into()),
                ApiError::InternalServerError(INTERNAL_ERROR.into()),
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err), expected);
        }
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::Conflict("taken".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
