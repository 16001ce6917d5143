use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{DayKey, Salon, SalonPhoto, WeeklyHours};
use crate::services::availability;
use crate::state::AppState;

use super::auth::UserProfile;
use super::authenticate;
use super::staff::StaffResponse;

#[derive(Deserialize)]
pub struct SalonPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location_lat: f64,
    #[serde(default)]
    pub location_lon: f64,
    #[serde(default)]
    pub map_link: String,
    #[serde(default)]
    pub working_hours: WeeklyHours,
}

impl SalonPayload {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        self.working_hours
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))
    }
}

#[derive(Serialize)]
pub struct SalonPhotoResponse {
    pub id: String,
    pub url: String,
    pub sort_order: i64,
    pub is_main: bool,
}

#[derive(Serialize)]
pub struct SalonResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location_lat: f64,
    pub location_lon: f64,
    pub map_link: String,
    pub working_hours: WeeklyHours,
    pub owner: Option<UserProfile>,
    pub staff: Vec<StaffResponse>,
    pub photos: Vec<SalonPhotoResponse>,
}

fn build_salon_response(db: &Connection, salon: Salon) -> Result<SalonResponse, AppError> {
    let owner = queries::get_user_by_id(db, &salon.owner_id)?;
    let staff = queries::list_staff(db, Some(&salon.id))?
        .into_iter()
        .map(StaffResponse::from)
        .collect();
    let photos = queries::list_salon_photos(db, &salon.id)?
        .into_iter()
        .map(|p| SalonPhotoResponse {
            id: p.id,
            url: p.url,
            sort_order: p.sort_order,
            is_main: p.is_main,
        })
        .collect();

    Ok(SalonResponse {
        id: salon.id,
        title: salon.title,
        description: salon.description,
        location_lat: salon.location_lat,
        location_lon: salon.location_lon,
        map_link: salon.map_link,
        working_hours: salon.working_hours,
        owner: owner.as_ref().map(UserProfile::from),
        staff,
        photos,
    })
}

fn load_salon(db: &Connection, id: &str) -> Result<Salon, AppError> {
    queries::get_salon(db, id)?.ok_or_else(|| AppError::NotFound("Salon not found".to_string()))
}

// GET /salons
pub async fn list_salons(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SalonResponse>>, AppError> {
    let db = state.db.lock().unwrap();
    let salons = queries::list_salons(&db)?;

    let mut response = Vec::with_capacity(salons.len());
    for salon in salons {
        response.push(build_salon_response(&db, salon)?);
    }
    Ok(Json(response))
}

// POST /salons
pub async fn create_salon(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SalonPayload>,
) -> Result<(StatusCode, Json<SalonResponse>), AppError> {
    let user = authenticate(&state, &headers)?;
    payload.validate()?;

    let now = Utc::now().naive_utc();
    let salon = Salon {
        id: uuid::Uuid::new_v4().to_string(),
        title: payload.title,
        description: payload.description,
        location_lat: payload.location_lat,
        location_lon: payload.location_lon,
        map_link: payload.map_link,
        working_hours: payload.working_hours,
        owner_id: user.id,
        created_at: now,
        updated_at: now,
    };

    let db = state.db.lock().unwrap();
    queries::create_salon(&db, &salon)?;
    let response = build_salon_response(&db, salon)?;
    Ok((StatusCode::CREATED, Json(response)))
}

// GET /salons/:id
pub async fn get_salon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SalonResponse>, AppError> {
    let db = state.db.lock().unwrap();
    let salon = load_salon(&db, &id)?;
    Ok(Json(build_salon_response(&db, salon)?))
}

// PUT /salons/:id
pub async fn update_salon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<SalonPayload>,
) -> Result<Json<SalonResponse>, AppError> {
    let user = authenticate(&state, &headers)?;
    payload.validate()?;

    let db = state.db.lock().unwrap();
    let mut salon = load_salon(&db, &id)?;
    if salon.owner_id != user.id && !user.is_staff {
        return Err(AppError::Forbidden);
    }

    salon.title = payload.title;
    salon.description = payload.description;
    salon.location_lat = payload.location_lat;
    salon.location_lon = payload.location_lon;
    salon.map_link = payload.map_link;
    salon.working_hours = payload.working_hours;
    salon.updated_at = Utc::now().naive_utc();
    queries::update_salon(&db, &salon)?;

    Ok(Json(build_salon_response(&db, salon)?))
}

// DELETE /salons/:id
pub async fn delete_salon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = authenticate(&state, &headers)?;

    let db = state.db.lock().unwrap();
    let salon = load_salon(&db, &id)?;
    if salon.owner_id != user.id && !user.is_staff {
        return Err(AppError::Forbidden);
    }

    queries::delete_salon(&db, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /salons/:id/photos
#[derive(Deserialize)]
pub struct AddPhotoRequest {
    pub url: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_main: bool,
}

pub async fn add_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<AddPhotoRequest>,
) -> Result<(StatusCode, Json<SalonPhotoResponse>), AppError> {
    let user = authenticate(&state, &headers)?;
    if req.url.trim().is_empty() {
        return Err(AppError::Validation("Photo URL is required".to_string()));
    }

    let db = state.db.lock().unwrap();
    let salon = load_salon(&db, &id)?;
    if salon.owner_id != user.id && !user.is_staff {
        return Err(AppError::Forbidden);
    }

    let photo = SalonPhoto {
        id: uuid::Uuid::new_v4().to_string(),
        salon_id: salon.id,
        url: req.url,
        sort_order: req.sort_order,
        is_main: req.is_main,
        created_at: Utc::now().naive_utc(),
    };
    queries::add_salon_photo(&db, &photo)?;

    Ok((
        StatusCode::CREATED,
        Json(SalonPhotoResponse {
            id: photo.id,
            url: photo.url,
            sort_order: photo.sort_order,
            is_main: photo.is_main,
        }),
    ))
}

// GET /salons/:id/available_times?date=YYYY-MM-DD&staff_id=<optional>
#[derive(Deserialize)]
pub struct AvailableTimesQuery {
    pub date: Option<String>,
    pub staff_id: Option<String>,
}

#[derive(Serialize)]
pub struct AvailableTimesResponse {
    pub available_times: Vec<String>,
}

pub async fn available_times(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<AvailableTimesQuery>,
) -> Result<Json<AvailableTimesResponse>, AppError> {
    let date_param = query
        .date
        .ok_or_else(|| AppError::Validation("Date parameter is required".to_string()))?;
    let date = NaiveDate::parse_from_str(&date_param, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".to_string()))?;

    let db = state.db.lock().unwrap();
    let salon = load_salon(&db, &id)?;

    let staff = match query.staff_id {
        Some(staff_id) => queries::get_staff(&db, &staff_id)?
            .filter(|s| s.salon_id == salon.id)
            .ok_or_else(|| AppError::NotFound("Staff not found".to_string()))?,
        None => queries::first_staff_for_salon(&db, &salon.id)?.ok_or(AppError::NoStaffAvailable)?,
    };

    let day = DayKey::from(date.weekday());
    let booked = queries::booked_times(&db, &salon.id, &staff.id, date)?;

    let slots = availability::available_slots(
        salon.working_hours.window_for(day),
        staff.working_shifts.window_for(day),
        &booked,
        Duration::minutes(state.config.slot_length_minutes),
    )?;

    Ok(Json(AvailableTimesResponse {
        available_times: slots
            .into_iter()
            .map(|t| t.format("%H:%M").to_string())
            .collect(),
    }))
}
