pub mod booking;
pub mod hours;
pub mod salon;
pub mod staff;
pub mod user;

pub use booking::{Booking, BookingStatus, InvalidTransition};
pub use hours::{DayKey, TimeWindow, WeeklyHours};
pub use salon::{Salon, SalonPhoto};
pub use staff::{Service, Staff};
pub use user::{OtpCredential, User};
