//! Authentication API endpoints
//!
//! Issues HMAC-signed tokens for the gallery admin credentials.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::json::JsonRejection;
use crate::api::types::Json;
use crate::infrastructure::auth::LoginError;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login request; absent fields are treated as empty
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub token: String,
    /// Expiry as epoch milliseconds
    pub expires: i64,
}

/// Failed login
#[derive(Debug, Serialize)]
pub struct LoginFailure {
    pub ok: bool,
    pub error: String,
}

impl LoginFailure {
    fn response(status: StatusCode, error: impl Into<String>) -> Response {
        let body = Self {
            ok: false,
            error: error.into(),
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &self {
            // Signing details stay in the logs
            LoginError::Internal(_) => "Internal error".to_string(),
            other => other.to_string(),
        };

        LoginFailure::response(status, message)
    }
}

/// Login with user and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "Rejected login body");
            return LoginFailure::response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    match state
        .login_service
        .login(request.user.trim(), &request.password)
    {
        Ok(issued) => Json(LoginResponse {
            ok: true,
            token: issued.token,
            expires: issued.expires,
        })
        .into_response(),
        Err(e) => {
            if let LoginError::Internal(inner) = &e {
                tracing::error!(error = %inner, "Failed to issue login token");
            }
            e.into_response()
        }
    }
}
