use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::InvalidTransition;
use crate::services::availability::SlotError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Salon is closed on this day")]
    SalonClosed,

    #[error("Staff is not working on this day")]
    StaffNotWorking,

    #[error("No staff available")]
    NoStaffAvailable,

    #[error("Booking cannot be {0}")]
    InvalidTransition(&'static str),

    #[error("OTP has expired")]
    OtpExpired,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SlotError> for AppError {
    fn from(e: SlotError) -> Self {
        match e {
            SlotError::SalonClosed => AppError::SalonClosed,
            SlotError::StaffNotWorking => AppError::StaffNotWorking,
        }
    }
}

impl From<InvalidTransition> for AppError {
    fn from(e: InvalidTransition) -> Self {
        AppError::InvalidTransition(e.action)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SalonClosed => StatusCode::BAD_REQUEST,
            AppError::StaffNotWorking => StatusCode::BAD_REQUEST,
            AppError::NoStaffAvailable => StatusCode::BAD_REQUEST,
            AppError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
            AppError::OtpExpired => StatusCode::BAD_REQUEST,
            AppError::InvalidOtp => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
