use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod authenticate;
pub mod get_profile;
pub mod health;
pub mod register;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON";
pub const EMAIL_TAKEN_MESSAGE: &str = "User with this email already exists";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

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

/// Errors surfaced at the HTTP boundary.
///
/// The message of each variant is sent to the client as is, so internal
/// detail must be logged before building an `InternalServerError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    ServiceUnavailable(String),
}

impl ApiError {
    /// Log `detail` and return the generic 500.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal error");
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
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
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::BadRequest(INVALID_JSON_MESSAGE.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound(USER_NOT_FOUND_MESSAGE.to_string())
            }
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(EMAIL_TAKEN_MESSAGE.to_string()),
            UserError::InvalidUsername(ref e) => ApiError::BadRequest(e.to_string()),
            UserError::InvalidEmail(ref e) => ApiError::BadRequest(e.to_string()),
            UserError::Password(auth::PasswordError::WeakSecret(message)) => {
                ApiError::BadRequest(message)
            }
            UserError::Password(auth::PasswordError::HashingFailed(_))
            | UserError::DatabaseError(_) => ApiError::internal(err),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::EmailError;

    #[test]
    fn test_user_error_mapping() {
        assert_eq!(
            ApiError::from(UserError::EmailAlreadyExists("a@example.com".to_string())),
            ApiError::Conflict("User with this email already exists".to_string())
        );
        assert_eq!(
            ApiError::from(UserError::NotFound("7".to_string())),
            ApiError::NotFound("User not found".to_string())
        );
        assert_eq!(
            ApiError::from(UserError::InvalidEmail(EmailError::Missing)),
            ApiError::BadRequest("email is required".to_string())
        );
        assert_eq!(
            ApiError::from(UserError::Password(auth::PasswordError::WeakSecret(
                "password must be at least 8 characters long".to_string()
            ))),
            ApiError::BadRequest("password must be at least 8 characters long".to_string())
        );
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = ApiError::from(UserError::DatabaseError(
            "connection to 10.0.0.5 refused".to_string(),
        ));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );

        let err = ApiError::from(UserError::Password(auth::PasswordError::HashingFailed(
            "out of memory".to_string(),
        )));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }
}
