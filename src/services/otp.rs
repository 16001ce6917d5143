use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{OtpCredential, User};

#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("User not found")]
    UserNotFound,

    #[error("OTP has expired")]
    Expired,

    #[error("Invalid OTP")]
    Invalid,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Get-or-create the user for this phone number and store a fresh
/// credential for it. Re-issuing overwrites any previous code.
pub fn issue(
    conn: &Connection,
    phone: &str,
    code: &str,
    now: NaiveDateTime,
) -> anyhow::Result<User> {
    let user = match queries::get_user_by_phone(conn, phone)? {
        Some(user) => user,
        None => {
            let user = User::new(phone);
            queries::create_user(conn, &user)?;
            tracing::info!(phone = %phone, "registered new user");
            user
        }
    };

    queries::upsert_otp(
        conn,
        &OtpCredential {
            phone_number: phone.to_string(),
            code: code.to_string(),
            issued_at: now,
        },
    )?;

    Ok(user)
}

/// Checks a submitted code. Expiry is checked before the code itself, so a
/// stale code reports `Expired` even when it matches. A successful check
/// deletes the credential; each code verifies at most once.
pub fn verify(
    conn: &Connection,
    phone: &str,
    code: &str,
    now: NaiveDateTime,
    ttl_minutes: i64,
) -> Result<User, OtpError> {
    let user = queries::get_user_by_phone(conn, phone)?.ok_or(OtpError::UserNotFound)?;

    let cred = queries::get_otp(conn, phone)?.ok_or(OtpError::Invalid)?;

    if now - cred.issued_at > Duration::minutes(ttl_minutes) {
        return Err(OtpError::Expired);
    }

    if cred.code != code {
        return Err(OtpError::Invalid);
    }

    queries::clear_otp(conn, phone)?;

    Ok(user)
}
