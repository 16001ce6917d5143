use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Service, Staff, User, WeeklyHours};
use crate::state::AppState;

use super::authenticate;

#[derive(Serialize)]
pub struct StaffResponse {
    pub id: String,
    pub salon_id: String,
    pub full_name: String,
    pub services: Vec<Service>,
    pub working_shifts: WeeklyHours,
}

impl From<Staff> for StaffResponse {
    fn from(staff: Staff) -> Self {
        Self {
            id: staff.id,
            salon_id: staff.salon_id,
            full_name: staff.full_name,
            services: staff.services,
            working_shifts: staff.working_shifts,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateStaffPayload {
    pub salon_id: String,
    pub full_name: String,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub working_shifts: WeeklyHours,
}

#[derive(Deserialize)]
pub struct UpdateStaffPayload {
    pub full_name: String,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub working_shifts: WeeklyHours,
}

fn validate_staff_fields(
    full_name: &str,
    services: &[Service],
    shifts: &WeeklyHours,
) -> Result<(), AppError> {
    if full_name.trim().is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }
    for service in services {
        if service.name.trim().is_empty() {
            return Err(AppError::Validation("Service name is required".to_string()));
        }
        if service.price < 0 {
            return Err(AppError::Validation(
                "Service price cannot be negative".to_string(),
            ));
        }
    }
    shifts
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

fn check_salon_owner(db: &Connection, salon_id: &str, user: &User) -> Result<(), AppError> {
    let salon = queries::get_salon(db, salon_id)?
        .ok_or_else(|| AppError::NotFound("Salon not found".to_string()))?;
    if salon.owner_id != user.id && !user.is_staff {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

// GET /staff?salon_id=<optional>
#[derive(Deserialize)]
pub struct StaffListQuery {
    pub salon_id: Option<String>,
}

pub async fn list_staff(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StaffListQuery>,
) -> Result<Json<Vec<StaffResponse>>, AppError> {
    let db = state.db.lock().unwrap();
    let staff = queries::list_staff(&db, query.salon_id.as_deref())?;
    Ok(Json(staff.into_iter().map(StaffResponse::from).collect()))
}

// POST /staff
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateStaffPayload>,
) -> Result<(StatusCode, Json<StaffResponse>), AppError> {
    let user = authenticate(&state, &headers)?;
    validate_staff_fields(&payload.full_name, &payload.services, &payload.working_shifts)?;

    let db = state.db.lock().unwrap();
    check_salon_owner(&db, &payload.salon_id, &user)?;

    let now = Utc::now().naive_utc();
    let staff = Staff {
        id: uuid::Uuid::new_v4().to_string(),
        salon_id: payload.salon_id,
        full_name: payload.full_name,
        services: payload.services,
        working_shifts: payload.working_shifts,
        created_at: now,
        updated_at: now,
    };
    queries::create_staff(&db, &staff)?;

    Ok((StatusCode::CREATED, Json(StaffResponse::from(staff))))
}

// GET /staff/:id
pub async fn get_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StaffResponse>, AppError> {
    let db = state.db.lock().unwrap();
    let staff = queries::get_staff(&db, &id)?
        .ok_or_else(|| AppError::NotFound("Staff not found".to_string()))?;
    Ok(Json(StaffResponse::from(staff)))
}

// PUT /staff/:id
pub async fn update_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateStaffPayload>,
) -> Result<Json<StaffResponse>, AppError> {
    let user = authenticate(&state, &headers)?;
    validate_staff_fields(&payload.full_name, &payload.services, &payload.working_shifts)?;

    let db = state.db.lock().unwrap();
    let mut staff = queries::get_staff(&db, &id)?
        .ok_or_else(|| AppError::NotFound("Staff not found".to_string()))?;
    check_salon_owner(&db, &staff.salon_id, &user)?;

    staff.full_name = payload.full_name;
    staff.services = payload.services;
    staff.working_shifts = payload.working_shifts;
    staff.updated_at = Utc::now().naive_utc();
    queries::update_staff(&db, &staff)?;

    Ok(Json(StaffResponse::from(staff)))
}

// DELETE /staff/:id
pub async fn delete_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = authenticate(&state, &headers)?;

    let db = state.db.lock().unwrap();
    let staff = queries::get_staff(&db, &id)?
        .ok_or_else(|| AppError::NotFound("Staff not found".to_string()))?;
    check_salon_owner(&db, &staff.salon_id, &user)?;

    queries::delete_staff(&db, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
