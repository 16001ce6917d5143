pub mod auth;
pub mod availability;
pub mod messaging;
pub mod otp;
