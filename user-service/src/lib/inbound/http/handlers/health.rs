use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub const DATABASE_UNAVAILABLE_MESSAGE: &str = "Database connection failed";

pub async fn health(State(state): State<AppState>) -> Result<ApiSuccess<HealthData>, ApiError> {
    if let Err(e) = state.user_service.health_check().await {
        tracing::error!(error = %e, "Health check failed");
        return Err(ApiError::ServiceUnavailable(
            DATABASE_UNAVAILABLE_MESSAGE.to_string(),
        ));
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        HealthData {
            status: "ok".to_string(),
            message: "Service is running".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: String,
    pub message: String,
}
