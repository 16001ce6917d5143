use std::sync::{Arc, Mutex};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use salon_booking::config::AppConfig;
use salon_booking::db;
use salon_booking::handlers;
use salon_booking::services::auth::TokenService;
use salon_booking::services::messaging::twilio::TwilioSmsProvider;
use salon_booking::services::messaging::{LogSmsProvider, MessagingProvider};
use salon_booking::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let messaging: Box<dyn MessagingProvider> = match config.sms_provider.as_str() {
        "twilio" => {
            anyhow::ensure!(
                !config.twilio_account_sid.is_empty(),
                "TWILIO_ACCOUNT_SID must be set when SMS_PROVIDER=twilio"
            );
            tracing::info!("using Twilio SMS provider");
            Box::new(TwilioSmsProvider::new(
                config.twilio_account_sid.clone(),
                config.twilio_auth_token.clone(),
                config.twilio_phone_number.clone(),
            ))
        }
        _ => {
            tracing::info!("using log SMS provider (codes are written to the log)");
            Box::new(LogSmsProvider)
        }
    };

    let tokens = TokenService::new(
        &config.jwt_secret,
        config.access_ttl_minutes,
        config.refresh_ttl_days,
    );

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        tokens,
        messaging,
    });

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
