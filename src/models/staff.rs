use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::WeeklyHours;

/// A service offered by a staff member, with its price in minor currency
/// units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub salon_id: String,
    pub full_name: String,
    pub services: Vec<Service>,
    pub working_shifts: WeeklyHours,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
