use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::router::AppState;

/// Same reply for every non-blank email, registered or not.
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If the email is registered, a password reset link has been sent.";

pub async fn forgot_password(
    State(state): State<AppState>,
    body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let Json(body) = body?;

    state.password_reset.request_reset(&body.email).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new(FORGOT_PASSWORD_MESSAGE),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequest {
    email: String,
}
