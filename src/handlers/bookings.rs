use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::hours::hhmm;
use crate::models::{Booking, BookingStatus, Service, User};
use crate::state::AppState;

use super::authenticate;

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub salon_id: String,
    pub staff_id: String,
    pub client_id: String,
    pub service: Service,
    pub booking_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub booking_time: NaiveTime,
    pub status: BookingStatus,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            salon_id: b.salon_id,
            staff_id: b.staff_id,
            client_id: b.client_id,
            service: b.service,
            booking_date: b.booking_date,
            booking_time: b.booking_time,
            status: b.status,
        }
    }
}

/// Clients only see their own bookings; platform staff see everything.
fn visible_to(booking: &Booking, user: &User) -> bool {
    user.is_staff || booking.client_id == user.id
}

// GET /bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let user = authenticate(&state, &headers)?;

    let db = state.db.lock().unwrap();
    let bookings = if user.is_staff {
        queries::list_all_bookings(&db)?
    } else {
        queries::list_bookings_for_client(&db, &user.id)?
    };
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

// POST /bookings
#[derive(Deserialize)]
pub struct CreateBookingPayload {
    pub salon_id: String,
    pub staff_id: String,
    pub service: Service,
    pub booking_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub booking_time: NaiveTime,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let user = authenticate(&state, &headers)?;

    if payload.service.name.trim().is_empty() {
        return Err(AppError::Validation("Service name is required".to_string()));
    }

    let db = state.db.lock().unwrap();
    queries::get_salon(&db, &payload.salon_id)?
        .ok_or_else(|| AppError::NotFound("Salon not found".to_string()))?;
    let staff = queries::get_staff(&db, &payload.staff_id)?
        .ok_or_else(|| AppError::NotFound("Staff not found".to_string()))?;
    if staff.salon_id != payload.salon_id {
        return Err(AppError::Validation(
            "Staff does not belong to this salon".to_string(),
        ));
    }

    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        salon_id: payload.salon_id,
        staff_id: payload.staff_id,
        client_id: user.id,
        service: payload.service,
        booking_date: payload.booking_date,
        booking_time: payload.booking_time,
        status: BookingStatus::Pending,
        created_at: now,
        updated_at: now,
    };
    queries::create_booking(&db, &booking)?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

// GET /bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<BookingResponse>, AppError> {
    let user = authenticate(&state, &headers)?;

    let db = state.db.lock().unwrap();
    let booking = queries::get_booking(&db, &id)?
        .filter(|b| visible_to(b, &user))
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
    Ok(Json(BookingResponse::from(booking)))
}

#[derive(Serialize)]
pub struct TransitionResponse {
    pub status: BookingStatus,
}

// POST /bookings/:id/confirm
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<TransitionResponse>, AppError> {
    transition(&state, &id, &headers, Booking::confirm).await
}

// POST /bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<TransitionResponse>, AppError> {
    transition(&state, &id, &headers, Booking::cancel).await
}

async fn transition(
    state: &AppState,
    id: &str,
    headers: &HeaderMap,
    apply: fn(&mut Booking) -> Result<(), crate::models::InvalidTransition>,
) -> Result<Json<TransitionResponse>, AppError> {
    let user = authenticate(state, headers)?;

    let db = state.db.lock().unwrap();
    let mut booking = queries::get_booking(&db, id)?
        .filter(|b| visible_to(b, &user))
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    apply(&mut booking)?;

    let now = Utc::now().naive_utc();
    queries::update_booking_status(&db, &booking.id, booking.status, &now)?;

    tracing::info!(booking_id = %booking.id, status = booking.status.as_str(), "booking transition");

    Ok(Json(TransitionResponse {
        status: booking.status,
    }))
}
