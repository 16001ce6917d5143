use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{params, Connection, Row};

use crate::models::{Booking, BookingStatus, OtpCredential, Salon, SalonPhoto, Staff, User};

const DT_FMT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M";

fn fmt_dt(dt: &NaiveDateTime) -> String {
    dt.format(DT_FMT).to_string()
}

fn parse_dt(s: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DT_FMT)
        .map_err(|e| anyhow::anyhow!("bad datetime {s:?}: {e}"))
}

// ── Users ──

fn parse_user_row(row: &Row) -> anyhow::Result<User> {
    Ok(User {
        id: row.get(0)?,
        phone_number: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        is_staff: row.get::<_, i64>(4)? != 0,
        created_at: parse_dt(&row.get::<_, String>(5)?)?,
        updated_at: parse_dt(&row.get::<_, String>(6)?)?,
    })
}

const USER_COLS: &str = "id, phone_number, first_name, last_name, is_staff, created_at, updated_at";

pub fn create_user(conn: &Connection, user: &User) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (id, phone_number, first_name, last_name, is_staff, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user.id,
            user.phone_number,
            user.first_name,
            user.last_name,
            user.is_staff as i64,
            fmt_dt(&user.created_at),
            fmt_dt(&user.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_user_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<User>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLS} FROM users WHERE id = ?1"))?;
    let result = stmt.query_row(params![id], |row| Ok(parse_user_row(row)));
    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_user_by_phone(conn: &Connection, phone: &str) -> anyhow::Result<Option<User>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {USER_COLS} FROM users WHERE phone_number = ?1"
    ))?;
    let result = stmt.query_row(params![phone], |row| Ok(parse_user_row(row)));
    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_user_profile(
    conn: &Connection,
    id: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
    updated_at: &NaiveDateTime,
) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE users SET
           first_name = COALESCE(?2, first_name),
           last_name = COALESCE(?3, last_name),
           updated_at = ?4
         WHERE id = ?1",
        params![id, first_name, last_name, fmt_dt(updated_at)],
    )?;
    Ok(())
}

// ── OTP credentials ──

pub fn upsert_otp(conn: &Connection, cred: &OtpCredential) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO otp_credentials (phone_number, code, issued_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(phone_number) DO UPDATE SET
           code = excluded.code,
           issued_at = excluded.issued_at",
        params![cred.phone_number, cred.code, fmt_dt(&cred.issued_at)],
    )?;
    Ok(())
}

pub fn get_otp(conn: &Connection, phone: &str) -> anyhow::Result<Option<OtpCredential>> {
    let mut stmt = conn
        .prepare("SELECT phone_number, code, issued_at FROM otp_credentials WHERE phone_number = ?1")?;
    let result = stmt.query_row(params![phone], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    });
    match result {
        Ok((phone_number, code, issued_at)) => Ok(Some(OtpCredential {
            phone_number,
            code,
            issued_at: parse_dt(&issued_at)?,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn clear_otp(conn: &Connection, phone: &str) -> anyhow::Result<()> {
    conn.execute(
        "DELETE FROM otp_credentials WHERE phone_number = ?1",
        params![phone],
    )?;
    Ok(())
}

// ── Salons ──

const SALON_COLS: &str = "id, title, description, location_lat, location_lon, map_link, working_hours, owner_id, created_at, updated_at";

fn parse_salon_row(row: &Row) -> anyhow::Result<Salon> {
    let hours_json: String = row.get(6)?;
    Ok(Salon {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        location_lat: row.get(3)?,
        location_lon: row.get(4)?,
        map_link: row.get(5)?,
        working_hours: serde_json::from_str(&hours_json)?,
        owner_id: row.get(7)?,
        created_at: parse_dt(&row.get::<_, String>(8)?)?,
        updated_at: parse_dt(&row.get::<_, String>(9)?)?,
    })
}

pub fn create_salon(conn: &Connection, salon: &Salon) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO salons (id, title, description, location_lat, location_lon, map_link, working_hours, owner_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            salon.id,
            salon.title,
            salon.description,
            salon.location_lat,
            salon.location_lon,
            salon.map_link,
            serde_json::to_string(&salon.working_hours)?,
            salon.owner_id,
            fmt_dt(&salon.created_at),
            fmt_dt(&salon.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_salon(conn: &Connection, id: &str) -> anyhow::Result<Option<Salon>> {
    let mut stmt = conn.prepare(&format!("SELECT {SALON_COLS} FROM salons WHERE id = ?1"))?;
    let result = stmt.query_row(params![id], |row| Ok(parse_salon_row(row)));
    match result {
        Ok(salon) => Ok(Some(salon?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_salons(conn: &Connection) -> anyhow::Result<Vec<Salon>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SALON_COLS} FROM salons ORDER BY created_at ASC, id ASC"
    ))?;
    let rows = stmt.query_map([], |row| Ok(parse_salon_row(row)))?;

    let mut salons = vec![];
    for row in rows {
        salons.push(row??);
    }
    Ok(salons)
}

pub fn update_salon(conn: &Connection, salon: &Salon) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE salons SET
           title = ?2, description = ?3, location_lat = ?4, location_lon = ?5,
           map_link = ?6, working_hours = ?7, updated_at = ?8
         WHERE id = ?1",
        params![
            salon.id,
            salon.title,
            salon.description,
            salon.location_lat,
            salon.location_lon,
            salon.map_link,
            serde_json::to_string(&salon.working_hours)?,
            fmt_dt(&salon.updated_at),
        ],
    )?;
    Ok(())
}

pub fn delete_salon(conn: &Connection, id: &str) -> anyhow::Result<usize> {
    let count = conn.execute("DELETE FROM salons WHERE id = ?1", params![id])?;
    Ok(count)
}

// ── Salon photos ──

/// Inserts a photo. A photo marked as main demotes any existing main photo
/// for the same salon first, so the flag stays exclusive.
pub fn add_salon_photo(conn: &Connection, photo: &SalonPhoto) -> anyhow::Result<()> {
    if photo.is_main {
        conn.execute(
            "UPDATE salon_photos SET is_main = 0 WHERE salon_id = ?1 AND is_main = 1",
            params![photo.salon_id],
        )?;
    }
    conn.execute(
        "INSERT INTO salon_photos (id, salon_id, url, sort_order, is_main, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            photo.id,
            photo.salon_id,
            photo.url,
            photo.sort_order,
            photo.is_main as i64,
            fmt_dt(&photo.created_at),
        ],
    )?;
    Ok(())
}

pub fn list_salon_photos(conn: &Connection, salon_id: &str) -> anyhow::Result<Vec<SalonPhoto>> {
    let mut stmt = conn.prepare(
        "SELECT id, salon_id, url, sort_order, is_main, created_at
         FROM salon_photos WHERE salon_id = ?1 ORDER BY sort_order ASC, created_at ASC",
    )?;
    let rows = stmt.query_map(params![salon_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i64>(3)?,
            row.get::<_, i64>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut photos = vec![];
    for row in rows {
        let (id, salon_id, url, sort_order, is_main, created_at) = row?;
        photos.push(SalonPhoto {
            id,
            salon_id,
            url,
            sort_order,
            is_main: is_main != 0,
            created_at: parse_dt(&created_at)?,
        });
    }
    Ok(photos)
}

// ── Staff ──

const STAFF_COLS: &str = "id, salon_id, full_name, services, working_shifts, created_at, updated_at";

fn parse_staff_row(row: &Row) -> anyhow::Result<Staff> {
    let services_json: String = row.get(3)?;
    let shifts_json: String = row.get(4)?;
    Ok(Staff {
        id: row.get(0)?,
        salon_id: row.get(1)?,
        full_name: row.get(2)?,
        services: serde_json::from_str(&services_json)?,
        working_shifts: serde_json::from_str(&shifts_json)?,
        created_at: parse_dt(&row.get::<_, String>(5)?)?,
        updated_at: parse_dt(&row.get::<_, String>(6)?)?,
    })
}

pub fn create_staff(conn: &Connection, staff: &Staff) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO staff (id, salon_id, full_name, services, working_shifts, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            staff.id,
            staff.salon_id,
            staff.full_name,
            serde_json::to_string(&staff.services)?,
            serde_json::to_string(&staff.working_shifts)?,
            fmt_dt(&staff.created_at),
            fmt_dt(&staff.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_staff(conn: &Connection, id: &str) -> anyhow::Result<Option<Staff>> {
    let mut stmt = conn.prepare(&format!("SELECT {STAFF_COLS} FROM staff WHERE id = ?1"))?;
    let result = stmt.query_row(params![id], |row| Ok(parse_staff_row(row)));
    match result {
        Ok(staff) => Ok(Some(staff?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_staff(conn: &Connection, salon_id: Option<&str>) -> anyhow::Result<Vec<Staff>> {
    let mut staff = vec![];
    match salon_id {
        Some(salon_id) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {STAFF_COLS} FROM staff WHERE salon_id = ?1 ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt.query_map(params![salon_id], |row| Ok(parse_staff_row(row)))?;
            for row in rows {
                staff.push(row??);
            }
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {STAFF_COLS} FROM staff ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt.query_map([], |row| Ok(parse_staff_row(row)))?;
            for row in rows {
                staff.push(row??);
            }
        }
    }
    Ok(staff)
}

/// The staff member used when a slot query names no staff explicitly:
/// first by creation order, with the id as a tiebreaker so the choice is
/// stable.
pub fn first_staff_for_salon(conn: &Connection, salon_id: &str) -> anyhow::Result<Option<Staff>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {STAFF_COLS} FROM staff WHERE salon_id = ?1 ORDER BY created_at ASC, id ASC LIMIT 1"
    ))?;
    let result = stmt.query_row(params![salon_id], |row| Ok(parse_staff_row(row)));
    match result {
        Ok(staff) => Ok(Some(staff?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_staff(conn: &Connection, staff: &Staff) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE staff SET
           full_name = ?2, services = ?3, working_shifts = ?4, updated_at = ?5
         WHERE id = ?1",
        params![
            staff.id,
            staff.full_name,
            serde_json::to_string(&staff.services)?,
            serde_json::to_string(&staff.working_shifts)?,
            fmt_dt(&staff.updated_at),
        ],
    )?;
    Ok(())
}

pub fn delete_staff(conn: &Connection, id: &str) -> anyhow::Result<usize> {
    let count = conn.execute("DELETE FROM staff WHERE id = ?1", params![id])?;
    Ok(count)
}

// ── Bookings ──

const BOOKING_COLS: &str = "id, salon_id, staff_id, client_id, service, booking_date, booking_time, status, created_at, updated_at";

fn parse_booking_row(row: &Row) -> anyhow::Result<Booking> {
    let service_json: String = row.get(4)?;
    let date_str: String = row.get(5)?;
    let time_str: String = row.get(6)?;
    let status_str: String = row.get(7)?;
    Ok(Booking {
        id: row.get(0)?,
        salon_id: row.get(1)?,
        staff_id: row.get(2)?,
        client_id: row.get(3)?,
        service: serde_json::from_str(&service_json)?,
        booking_date: NaiveDate::parse_from_str(&date_str, DATE_FMT)
            .map_err(|e| anyhow::anyhow!("bad booking date {date_str:?}: {e}"))?,
        booking_time: NaiveTime::parse_from_str(&time_str, TIME_FMT)
            .map_err(|e| anyhow::anyhow!("bad booking time {time_str:?}: {e}"))?,
        status: BookingStatus::from_str(&status_str),
        created_at: parse_dt(&row.get::<_, String>(8)?)?,
        updated_at: parse_dt(&row.get::<_, String>(9)?)?,
    })
}

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, salon_id, staff_id, client_id, service, booking_date, booking_time, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            booking.id,
            booking.salon_id,
            booking.staff_id,
            booking.client_id,
            serde_json::to_string(&booking.service)?,
            booking.booking_date.format(DATE_FMT).to_string(),
            booking.booking_time.format(TIME_FMT).to_string(),
            booking.status.as_str(),
            fmt_dt(&booking.created_at),
            fmt_dt(&booking.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let mut stmt = conn.prepare(&format!("SELECT {BOOKING_COLS} FROM bookings WHERE id = ?1"))?;
    let result = stmt.query_row(params![id], |row| Ok(parse_booking_row(row)));
    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_bookings_for_client(conn: &Connection, client_id: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLS} FROM bookings WHERE client_id = ?1
         ORDER BY booking_date DESC, booking_time DESC"
    ))?;
    let rows = stmt.query_map(params![client_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn list_all_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLS} FROM bookings ORDER BY booking_date DESC, booking_time DESC"
    ))?;
    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Times already reserved for a staff member on a date. Only pending and
/// confirmed bookings block a slot; cancelled and completed ones free it.
pub fn booked_times(
    conn: &Connection,
    salon_id: &str,
    staff_id: &str,
    date: NaiveDate,
) -> anyhow::Result<Vec<NaiveTime>> {
    let mut stmt = conn.prepare(
        "SELECT booking_time FROM bookings
         WHERE salon_id = ?1 AND staff_id = ?2 AND booking_date = ?3
           AND status IN ('pending', 'confirmed')
         ORDER BY booking_time ASC",
    )?;
    let rows = stmt.query_map(
        params![salon_id, staff_id, date.format(DATE_FMT).to_string()],
        |row| row.get::<_, String>(0),
    )?;

    let mut times = vec![];
    for row in rows {
        let time_str = row?;
        times.push(
            NaiveTime::parse_from_str(&time_str, TIME_FMT)
                .map_err(|e| anyhow::anyhow!("bad booking time {time_str:?}: {e}"))?,
        );
    }
    Ok(times)
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
    updated_at: &NaiveDateTime,
) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE bookings SET status = ?2, updated_at = ?3 WHERE id = ?1",
        params![id, status.as_str(), fmt_dt(updated_at)],
    )?;
    Ok(())
}
