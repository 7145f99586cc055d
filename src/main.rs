use actix_web::{App, HttpServer, web};
use hotel_booking::infrastructure::config::AppConfig;
use hotel_booking::infrastructure::logging::init_logging;
use hotel_booking::presentation::handlers::AppState;
use hotel_booking::presentation::middleware::{
    RequestIdMiddleware, SessionMiddleware, TimingMiddleware,
};
use hotel_booking::presentation::routes::configure;
use tracing::{error, info};

fn startup_error(e: anyhow::Error) -> std::io::Error {
    error!(error = %e, "Startup failed");
    std::io::Error::other(e.to_string())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_logging();
    info!("Logging initialized");

    let config = AppConfig::from_env().map_err(startup_error)?;
    info!(
        host = %config.host,
        port = config.port,
        session_ttl_secs = config.session_ttl_secs,
        seed_hotels = config.seed_hotels,
        "Configuration loaded"
    );

    let state = web::Data::new(AppState::in_memory(
        config.session_secret.clone(),
        config.session_ttl_secs,
    ));

    if config.seed_hotels {
        state
            .hotel_service
            .seed_catalogue()
            .await
            .map_err(startup_error)?;
    }

    if let Some(admin) = &config.admin {
        state
            .auth_service
            .ensure_admin(&admin.email, &admin.password)
            .await
            .map_err(startup_error)?;
        info!(email = %admin.email, "Admin account ready");
    }

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SessionMiddleware)
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .configure(configure)
    });

    info!(host = %config.host, port = config.port, "Starting HTTP server");
    server.bind((config.host.as_str(), config.port))?.run().await
}
