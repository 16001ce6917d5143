use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use salon_booking::config::AppConfig;
use salon_booking::db::{self, queries};
use salon_booking::handlers;
use salon_booking::models::OtpCredential;
use salon_booking::services::auth::TokenService;
use salon_booking::services::messaging::MessagingProvider;
use salon_booking::state::AppState;

// ── Mock SMS provider ──

struct MockSms {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl MessagingProvider for MockSms {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        access_ttl_minutes: 60,
        refresh_ttl_days: 7,
        otp_ttl_minutes: 5,
        otp_test_code: "11111".to_string(),
        slot_length_minutes: 30,
        sms_provider: "log".to_string(),
        twilio_account_sid: String::new(),
        twilio_auth_token: String::new(),
        twilio_phone_number: String::new(),
    }
}

fn test_state_with_sent() -> (Arc<AppState>, Arc<Mutex<Vec<(String, String)>>>) {
    let config = test_config();
    let conn = db::init_db(":memory:").unwrap();
    let sent = Arc::new(Mutex::new(vec![]));
    let tokens = TokenService::new(
        &config.jwt_secret,
        config.access_ttl_minutes,
        config.refresh_ttl_days,
    );
    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config,
        tokens,
        messaging: Box::new(MockSms {
            sent: Arc::clone(&sent),
        }),
    });
    (state, sent)
}

fn test_state() -> Arc<AppState> {
    test_state_with_sent().0
}

fn test_app(state: Arc<AppState>) -> Router {
    handlers::router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Runs the full OTP login flow for a phone number and returns an access
/// token.
async fn login(app: &Router, phone: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/users/auth/",
        None,
        Some(serde_json::json!({ "phone_number": phone })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        "POST",
        "/users/auth/verify-otp/",
        None,
        Some(serde_json::json!({ "phone_number": phone, "otp": "11111" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["tokens"]["access"].as_str().unwrap().to_string()
}

async fn create_salon(app: &Router, token: &str, hours: serde_json::Value) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/salons",
        Some(token),
        Some(serde_json::json!({
            "title": "Elegant",
            "description": "Full service salon",
            "location_lat": 55.7558,
            "location_lon": 37.6173,
            "map_link": "https://maps.example.com/elegant",
            "working_hours": hours,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_staff(
    app: &Router,
    token: &str,
    salon_id: &str,
    shifts: serde_json::Value,
) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/staff",
        Some(token),
        Some(serde_json::json!({
            "salon_id": salon_id,
            "full_name": "Anna Petrova",
            "services": [{ "name": "Haircut", "price": 1500 }],
            "working_shifts": shifts,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_booking(
    app: &Router,
    token: &str,
    salon_id: &str,
    staff_id: &str,
    date: &str,
    time: &str,
) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/bookings",
        Some(token),
        Some(serde_json::json!({
            "salon_id": salon_id,
            "staff_id": staff_id,
            "service": { "name": "Haircut", "price": 1500 },
            "booking_date": date,
            "booking_time": time,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

fn weekday_hours() -> serde_json::Value {
    serde_json::json!({ "mon": { "start_time": "09:00", "end_time": "21:00" } })
}

// 2025-06-16 is a Monday, 2025-06-15 a Sunday.
const MONDAY: &str = "2025-06-16";
const SUNDAY: &str = "2025-06-15";

// ── Health ──

#[tokio::test]
async fn test_health() {
    let app = test_app(test_state());
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ── Auth flow ──

#[tokio::test]
async fn test_send_otp_delivers_code() {
    let (state, sent) = test_state_with_sent();
    let app = test_app(state);

    let (status, body) = send(
        &app,
        "POST",
        "/users/auth/",
        None,
        Some(serde_json::json!({ "phone_number": "+79001234567" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OTP sent successfully");

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "+79001234567");
    assert!(sent[0].1.contains("11111"));
}

#[tokio::test]
async fn test_send_otp_requires_phone() {
    let app = test_app(test_state());
    let (status, body) = send(
        &app,
        "POST",
        "/users/auth/",
        None,
        Some(serde_json::json!({ "phone_number": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Phone number is required");
}

#[tokio::test]
async fn test_verify_otp_unknown_user() {
    let app = test_app(test_state());
    let (status, body) = send(
        &app,
        "POST",
        "/users/auth/verify-otp/",
        None,
        Some(serde_json::json!({ "phone_number": "+79001234567", "otp": "11111" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_verify_otp_wrong_code() {
    let app = test_app(test_state());
    send(
        &app,
        "POST",
        "/users/auth/",
        None,
        Some(serde_json::json!({ "phone_number": "+79001234567" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/users/auth/verify-otp/",
        None,
        Some(serde_json::json!({ "phone_number": "+79001234567", "otp": "99999" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid OTP");
}

#[tokio::test]
async fn test_verify_otp_issues_tokens_once() {
    let app = test_app(test_state());
    send(
        &app,
        "POST",
        "/users/auth/",
        None,
        Some(serde_json::json!({ "phone_number": "+79001234567" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/users/auth/verify-otp/",
        None,
        Some(serde_json::json!({ "phone_number": "+79001234567", "otp": "11111" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OTP verified successfully");
    assert!(!body["tokens"]["access"].as_str().unwrap().is_empty());
    assert!(!body["tokens"]["refresh"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["phone_number"], "+79001234567");

    // the code is single-use
    let (status, body) = send(
        &app,
        "POST",
        "/users/auth/verify-otp/",
        None,
        Some(serde_json::json!({ "phone_number": "+79001234567", "otp": "11111" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid OTP");
}

#[tokio::test]
async fn test_verify_otp_expired() {
    let state = test_state();
    let app = test_app(Arc::clone(&state));
    send(
        &app,
        "POST",
        "/users/auth/",
        None,
        Some(serde_json::json!({ "phone_number": "+79001234567" })),
    )
    .await;

    // backdate the credential past the 5 minute window
    {
        let db = state.db.lock().unwrap();
        queries::upsert_otp(
            &db,
            &OtpCredential {
                phone_number: "+79001234567".to_string(),
                code: "11111".to_string(),
                issued_at: chrono::Utc::now().naive_utc() - chrono::Duration::minutes(6),
            },
        )
        .unwrap();
    }

    let (status, body) = send(
        &app,
        "POST",
        "/users/auth/verify-otp/",
        None,
        Some(serde_json::json!({ "phone_number": "+79001234567", "otp": "11111" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP has expired");
}

#[tokio::test]
async fn test_update_profile_requires_auth() {
    let app = test_app(test_state());
    let (status, _) = send(
        &app,
        "POST",
        "/users/auth/update-profile/",
        None,
        Some(serde_json::json!({ "first_name": "Anna" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;

    let (status, body) = send(
        &app,
        "POST",
        "/users/auth/update-profile/",
        Some(&token),
        Some(serde_json::json!({ "first_name": "Anna", "last_name": "Petrova" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["user"]["first_name"], "Anna");
    assert_eq!(body["user"]["last_name"], "Petrova");
}

// ── Salons ──

#[tokio::test]
async fn test_create_salon_requires_auth() {
    let app = test_app(test_state());
    let (status, _) = send(
        &app,
        "POST",
        "/salons",
        None,
        Some(serde_json::json!({ "title": "Elegant" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_salon_crud() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;

    let salon_id = create_salon(&app, &token, weekday_hours()).await;

    let (status, body) = send(&app, "GET", "/salons", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Elegant");

    let (status, body) = send(&app, "GET", &format!("/salons/{salon_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["working_hours"]["mon"]["start_time"], "09:00");
    assert_eq!(body["owner"]["phone_number"], "+79001234567");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/salons/{salon_id}"),
        Some(&token),
        Some(serde_json::json!({ "title": "Renamed", "working_hours": weekday_hours() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Renamed");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/salons/{salon_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/salons/{salon_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_salon_update_forbidden_for_non_owner() {
    let app = test_app(test_state());
    let owner = login(&app, "+79001234567").await;
    let other = login(&app, "+79007654321").await;
    let salon_id = create_salon(&app, &owner, weekday_hours()).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/salons/{salon_id}"),
        Some(&other),
        Some(serde_json::json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_salon_rejects_inverted_hours() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;

    let (status, _) = send(
        &app,
        "POST",
        "/salons",
        Some(&token),
        Some(serde_json::json!({
            "title": "Elegant",
            "working_hours": { "mon": { "start_time": "21:00", "end_time": "09:00" } },
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_photo_is_main_exclusive() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let salon_id = create_salon(&app, &token, weekday_hours()).await;

    for url in ["https://example.com/1.jpg", "https://example.com/2.jpg"] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/salons/{salon_id}/photos"),
            Some(&token),
            Some(serde_json::json!({ "url": url, "is_main": true })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, "GET", &format!("/salons/{salon_id}"), None, None).await;
    let photos = body["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 2);
    let mains: Vec<_> = photos
        .iter()
        .filter(|p| p["is_main"].as_bool().unwrap())
        .collect();
    assert_eq!(mains.len(), 1);
    assert_eq!(mains[0]["url"], "https://example.com/2.jpg");
}

// ── Staff ──

#[tokio::test]
async fn test_staff_create_requires_salon_owner() {
    let app = test_app(test_state());
    let owner = login(&app, "+79001234567").await;
    let other = login(&app, "+79007654321").await;
    let salon_id = create_salon(&app, &owner, weekday_hours()).await;

    let (status, _) = send(
        &app,
        "POST",
        "/staff",
        Some(&other),
        Some(serde_json::json!({
            "salon_id": salon_id,
            "full_name": "Anna Petrova",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_staff_list_filtered_by_salon() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let first = create_salon(&app, &token, weekday_hours()).await;
    let second = create_salon(&app, &token, weekday_hours()).await;
    create_staff(&app, &token, &first, weekday_hours()).await;

    let (_, body) = send(&app, "GET", &format!("/staff?salon_id={first}"), None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", &format!("/staff?salon_id={second}"), None, None).await;
    assert!(body.as_array().unwrap().is_empty());
}

// ── Available times ──

#[tokio::test]
async fn test_available_times_requires_date() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let salon_id = create_salon(&app, &token, weekday_hours()).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/salons/{salon_id}/available_times"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date parameter is required");
}

#[tokio::test]
async fn test_available_times_invalid_date() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let salon_id = create_salon(&app, &token, weekday_hours()).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/salons/{salon_id}/available_times?date=16-06-2025"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid date format");
}

#[tokio::test]
async fn test_available_times_unknown_salon() {
    let app = test_app(test_state());
    let (status, _) = send(
        &app,
        "GET",
        &format!("/salons/missing/available_times?date={MONDAY}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_available_times_no_staff() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let salon_id = create_salon(&app, &token, weekday_hours()).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/salons/{salon_id}/available_times?date={MONDAY}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No staff available");
}

#[tokio::test]
async fn test_available_times_salon_closed() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let salon_id = create_salon(&app, &token, weekday_hours()).await;
    create_staff(&app, &token, &salon_id, weekday_hours()).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/salons/{salon_id}/available_times?date={SUNDAY}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Salon is closed on this day");
}

#[tokio::test]
async fn test_available_times_staff_not_working() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    // salon open mon and tue, staff only works tue
    let salon_id = create_salon(
        &app,
        &token,
        serde_json::json!({
            "mon": { "start_time": "09:00", "end_time": "21:00" },
            "tue": { "start_time": "09:00", "end_time": "21:00" },
        }),
    )
    .await;
    create_staff(
        &app,
        &token,
        &salon_id,
        serde_json::json!({ "tue": { "start_time": "09:00", "end_time": "17:00" } }),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/salons/{salon_id}/available_times?date={MONDAY}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Staff is not working on this day");
}

#[tokio::test]
async fn test_available_times_excludes_booked_slot() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let salon_id = create_salon(&app, &token, weekday_hours()).await;
    let staff_id = create_staff(
        &app,
        &token,
        &salon_id,
        serde_json::json!({ "mon": { "start_time": "09:00", "end_time": "11:00" } }),
    )
    .await;
    create_booking(&app, &token, &salon_id, &staff_id, MONDAY, "09:30").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/salons/{salon_id}/available_times?date={MONDAY}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["available_times"],
        serde_json::json!(["09:00", "10:00", "10:30"])
    );
}

#[tokio::test]
async fn test_available_times_cancelled_booking_frees_slot() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let salon_id = create_salon(&app, &token, weekday_hours()).await;
    let staff_id = create_staff(
        &app,
        &token,
        &salon_id,
        serde_json::json!({ "mon": { "start_time": "09:00", "end_time": "10:00" } }),
    )
    .await;
    let booking_id = create_booking(&app, &token, &salon_id, &staff_id, MONDAY, "09:30").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/cancel"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/salons/{salon_id}/available_times?date={MONDAY}"),
        None,
        None,
    )
    .await;
    assert_eq!(
        body["available_times"],
        serde_json::json!(["09:00", "09:30"])
    );
}

#[tokio::test]
async fn test_available_times_explicit_staff_of_other_salon() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let first = create_salon(&app, &token, weekday_hours()).await;
    let second = create_salon(&app, &token, weekday_hours()).await;
    let other_staff = create_staff(&app, &token, &second, weekday_hours()).await;

    let (status, _) = send(
        &app,
        "GET",
        &format!("/salons/{first}/available_times?date={MONDAY}&staff_id={other_staff}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Bookings ──

#[tokio::test]
async fn test_booking_requires_auth() {
    let app = test_app(test_state());
    let (status, _) = send(&app, "GET", "/bookings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_staff_salon_mismatch() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let first = create_salon(&app, &token, weekday_hours()).await;
    let second = create_salon(&app, &token, weekday_hours()).await;
    let other_staff = create_staff(&app, &token, &second, weekday_hours()).await;

    let (status, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(serde_json::json!({
            "salon_id": first,
            "staff_id": other_staff,
            "service": { "name": "Haircut", "price": 1500 },
            "booking_date": MONDAY,
            "booking_time": "09:30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Staff does not belong to this salon");
}

#[tokio::test]
async fn test_booking_transitions() {
    let app = test_app(test_state());
    let token = login(&app, "+79001234567").await;
    let salon_id = create_salon(&app, &token, weekday_hours()).await;
    let staff_id = create_staff(&app, &token, &salon_id, weekday_hours()).await;
    let booking_id = create_booking(&app, &token, &salon_id, &staff_id, MONDAY, "09:30").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/confirm"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    // confirm is only valid from pending
    let (status, body) = send(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/confirm"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Booking cannot be confirmed");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/cancel"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/cancel"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Booking cannot be cancelled");
}

#[tokio::test]
async fn test_bookings_scoped_to_client() {
    let app = test_app(test_state());
    let owner = login(&app, "+79001234567").await;
    let client = login(&app, "+79007654321").await;
    let salon_id = create_salon(&app, &owner, weekday_hours()).await;
    let staff_id = create_staff(&app, &owner, &salon_id, weekday_hours()).await;

    create_booking(&app, &owner, &salon_id, &staff_id, MONDAY, "09:00").await;
    let client_booking =
        create_booking(&app, &client, &salon_id, &staff_id, MONDAY, "10:00").await;

    let (status, body) = send(&app, "GET", "/bookings", Some(&client), None).await;
    assert_eq!(status, StatusCode::OK);
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"], client_booking);

    // the other client's booking is invisible
    let (status, _) = send(
        &app,
        "GET",
        &format!("/bookings/{client_booking}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
