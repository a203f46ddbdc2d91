use auth::GateError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::Extensions;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::handlers::ApiError;
use super::handlers::ApiResponseBody;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Challenge sent with every 401 from the gate.
pub const WWW_AUTHENTICATE_CHALLENGE: &str = r#"Bearer realm="api""#;

/// Identity of the caller, stored in request extensions by [`authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

impl AuthenticatedUser {
    /// Read the identity attached by the gate, if any.
    pub fn from_extensions(extensions: &Extensions) -> Option<&AuthenticatedUser> {
        extensions.get::<AuthenticatedUser>()
    }
}

impl From<auth::Identity> for AuthenticatedUser {
    fn from(identity: auth::Identity) -> Self {
        Self {
            user_id: UserId(identity.user_id),
            username: identity.username,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Reaching a handler without an identity means the route was not
        // wrapped by the gate.
        AuthenticatedUser::from_extensions(&parts.extensions)
            .cloned()
            .ok_or_else(|| ApiError::internal("authenticated user missing from request"))
    }
}

/// Admission check for protected routes.
///
/// Validates the bearer token and adds the caller's identity to request
/// extensions. Rejected requests never reach the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| reject(GateError::InvalidFormat))?),
        None => None,
    };

    let identity = state.authenticator.admit(authorization).map_err(reject)?;

    tracing::debug!(user_id = identity.user_id, "Request admitted");

    req.extensions_mut()
        .insert(AuthenticatedUser::from(identity));

    Ok(next.run(req).await)
}

fn reject(err: GateError) -> Response {
    match &err {
        GateError::MissingHeader => tracing::debug!("Authorization header missing"),
        GateError::InvalidFormat => tracing::warn!("Invalid authorization header format"),
        GateError::InvalidToken(e) => tracing::warn!(error = %e, "Token validation failed"),
    }

    let status = StatusCode::UNAUTHORIZED;
    (
        status,
        [(header::WWW_AUTHENTICATE, WWW_AUTHENTICATE_CHALLENGE)],
        Json(ApiResponseBody::new_error(
            status,
            err.public_message().to_string(),
        )),
    )
        .into_response()
}
