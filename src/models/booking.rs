use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::hours::hhmm;
use super::Service;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub salon_id: String,
    pub staff_id: String,
    pub client_id: String,
    pub service: Service,
    pub booking_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub booking_time: NaiveTime,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" => BookingStatus::Cancelled,
            "completed" => BookingStatus::Completed,
            _ => BookingStatus::Pending,
        }
    }
}

/// Rejected status transition. Renders as the client-facing message
/// ("Booking cannot be confirmed" / "Booking cannot be cancelled").
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Booking cannot be {action}")]
pub struct InvalidTransition {
    pub action: &'static str,
}

impl Booking {
    /// `pending` -> `confirmed`; any other starting status is rejected and
    /// the booking is left untouched.
    pub fn confirm(&mut self) -> Result<(), InvalidTransition> {
        match self.status {
            BookingStatus::Pending => {
                self.status = BookingStatus::Confirmed;
                Ok(())
            }
            _ => Err(InvalidTransition {
                action: "confirmed",
            }),
        }
    }

    /// `pending` or `confirmed` -> `cancelled`. Bookings are never deleted;
    /// cancellation is the terminal client-facing state.
    pub fn cancel(&mut self) -> Result<(), InvalidTransition> {
        match self.status {
            BookingStatus::Pending | BookingStatus::Confirmed => {
                self.status = BookingStatus::Cancelled;
                Ok(())
            }
            _ => Err(InvalidTransition {
                action: "cancelled",
            }),
        }
    }
}
