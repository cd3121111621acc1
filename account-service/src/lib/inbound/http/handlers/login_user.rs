use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::register_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::errors::EmailError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login_user(
    State(state): State<AppState>,
    body: Result<Json<LoginUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginUserResponseData>, ApiError> {
    let Json(body) = body?;

    // A malformed email cannot belong to an account.
    let email = EmailAddress::new(&body.email).map_err(|e| match e {
        EmailError::Empty => ApiError::from(AccountError::from(e)),
        _ => ApiError::from(AccountError::InvalidCredentials),
    })?;

    let outcome = state
        .authentication
        .login(LoginCommand::new(email, body.password))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginUserResponseData {
            user: (&outcome.credential).into(),
            token: outcome.access_token,
            expires_at: outcome.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginUserRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUserResponseData {
    pub user: UserData,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
