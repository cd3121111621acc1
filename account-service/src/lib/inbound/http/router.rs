use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::forgot_password::forgot_password;
use super::handlers::login_user::login_user;
use super::handlers::register_user::register_user;
use super::handlers::reset_password::reset_password;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AuthenticationPort;
use crate::domain::account::ports::Clock;
use crate::domain::account::ports::PasswordResetPort;

#[derive(Clone)]
pub struct AppState {
    pub authentication: Arc<dyn AuthenticationPort>,
    pub password_reset: Arc<dyn PasswordResetPort>,
    pub authenticator: Arc<Authenticator>,
    pub clock: Arc<dyn Clock>,
}

/// Build the HTTP application.
///
/// # Arguments
/// * `authentication` - Registration and login
/// * `password_reset` - Forgot/reset password flow
/// * `authenticator` - Verifies access tokens on protected routes
/// * `clock` - Time source for access token expiry
pub fn create_router(
    authentication: Arc<dyn AuthenticationPort>,
    password_reset: Arc<dyn PasswordResetPort>,
    authenticator: Arc<Authenticator>,
    clock: Arc<dyn Clock>,
) -> Router {
    let state = AppState {
        authentication,
        password_reset,
        authenticator,
        clock,
    };

    let public_routes = Router::new()
        .route("/api/user/registerUser", post(register_user))
        .route("/api/user/loginUser", post(login_user))
        .route("/api/user/forgot-password", post(forgot_password))
        .route("/api/user/reset-password", post(reset_password));

    let protected_routes = Router::new()
        .route("/api/user/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
