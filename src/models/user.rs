use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn new(phone_number: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            phone_number: phone_number.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Short-lived login credential, stored separately from the user row and
/// deleted on successful verification.
#[derive(Debug, Clone)]
pub struct OtpCredential {
    pub phone_number: String,
    pub code: String,
    pub issued_at: NaiveDateTime,
}
