use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub const LOGIN_MESSAGE: &str = "Login successful";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Exchange email and password for a session token.
///
/// Unknown email, wrong password and a failing user store all produce the
/// same 401 body.
pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let Json(body) = payload?;
    body.validate()?;

    let user = match state.user_service.get_user_by_email(&body.email).await {
        Ok(user) => user,
        Err(e) => {
            if !matches!(e, UserError::NotFoundByEmail(_)) {
                tracing::warn!(error = %e, "User lookup failed during login");
            }
            return Err(map_authentication_error(
                state.authenticator.reject_unknown_user(&body.password),
            ));
        }
    };

    let result = state
        .authenticator
        .authenticate(
            &body.password,
            &user.password_hash,
            &auth::Identity::from(&user),
        )
        .map_err(|e| {
            if matches!(e, auth::AuthenticationError::InvalidCredentials) {
                tracing::info!(user_id = %user.id, "Login rejected");
            }
            map_authentication_error(e)
        })?;

    tracing::info!(user_id = %user.id, "Login succeeded");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            message: LOGIN_MESSAGE.to_string(),
            user: (&user).into(),
            token: result.access_token,
        },
    ))
}

fn map_authentication_error(err: auth::AuthenticationError) -> ApiError {
    match err {
        auth::AuthenticationError::InvalidCredentials => {
            ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
        }
        auth::AuthenticationError::PasswordError(_) | auth::AuthenticationError::JwtError(_) => {
            ApiError::internal(err)
        }
    }
}

#[derive(Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

impl AuthenticateRequestBody {
    fn validate(&self) -> Result<(), ApiError> {
        if self.email.is_empty() {
            return Err(ApiError::BadRequest("email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(ApiError::BadRequest("password is required".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for AuthenticateRequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticateRequestBody")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub message: String,
    pub user: UserData,
    pub token: String,
}

/// Public view of a user returned alongside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub username: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            username: user.username.as_str().to_string(),
        }
    }
}
