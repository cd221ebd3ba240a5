//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use quill_core::ports::{TokenRevocationStore, TokenService};
use quill_infra::{InMemoryRevocationStore, JwtTokenService};

mod config;
mod handlers;
mod middleware;
mod requests;
mod resources;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    let Some(db_config) = config.database.as_ref() else {
        tracing::error!("DATABASE_URL is not set; the API cannot run without its database");
        return Err(std::io::Error::other("DATABASE_URL not set"));
    };

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(db_config)
        .await
        .map_err(|e| std::io::Error::other(format!("database initialization failed: {e}")))?;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let revocations: Arc<dyn TokenRevocationStore> = Arc::new(InMemoryRevocationStore::new());

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(revocations.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,quill_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
