pub mod auth;
pub mod bookings;
pub mod health;
pub mod salons;
pub mod staff;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::User;
use crate::state::AppState;

/// Resolves the request's bearer access token to a user. Locks the
/// database only for the lookup, so callers can take the lock afterwards.
pub(crate) fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let claims = state
        .tokens
        .verify_access(token)
        .map_err(|_| AppError::Unauthorized)?;

    let db = state.db.lock().unwrap();
    queries::get_user_by_id(&db, &claims.sub)?.ok_or(AppError::Unauthorized)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/salons", get(salons::list_salons).post(salons::create_salon))
        .route(
            "/salons/:id",
            get(salons::get_salon)
                .put(salons::update_salon)
                .delete(salons::delete_salon),
        )
        .route("/salons/:id/available_times", get(salons::available_times))
        .route("/salons/:id/photos", post(salons::add_photo))
        .route("/staff", get(staff::list_staff).post(staff::create_staff))
        .route(
            "/staff/:id",
            get(staff::get_staff)
                .put(staff::update_staff)
                .delete(staff::delete_staff),
        )
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/confirm", post(bookings::confirm_booking))
        .route("/bookings/:id/cancel", post(bookings::cancel_booking))
        .route("/users/auth/", post(auth::send_otp))
        .route("/users/auth/verify-otp/", post(auth::verify_otp))
        .route("/users/auth/update-profile/", post(auth::update_profile))
        .with_state(state)
}
