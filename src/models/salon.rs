use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::WeeklyHours;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salon {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location_lat: f64,
    pub location_lon: f64,
    pub map_link: String,
    pub working_hours: WeeklyHours,
    pub owner_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A photo record for a salon gallery. Images themselves live elsewhere;
/// only the URL is stored. At most one photo per salon is the main one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonPhoto {
    pub id: String,
    pub salon_id: String,
    pub url: String,
    pub sort_order: i64,
    pub is_main: bool,
    pub created_at: NaiveDateTime,
}
