use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use playboard_engine::config::{LogFormat, LoggingSettings, Settings};
use playboard_engine::core::{Recommender, Tables};
use playboard_engine::routes::{self, handle_json_payload_error, AppState};
use playboard_engine::services::{CatalogCache, CatalogClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

fn init_tracing(logging: &LoggingSettings) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&logging.level))
        .with_target(false)
        .with_level(true);

    match logging.log_format() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Logging comes from the settings, so load them first and report a
    // failure once the subscriber is up
    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    info!("Starting Play Board recommendation service...");

    let settings = settings.map_err(|e| startup_error("Failed to load configuration", e))?;

    info!("Configuration loaded successfully");

    let tables = Tables::load(
        settings.tables.lexicon_path.as_deref(),
        settings.tables.rules_path.as_deref(),
    )
    .map_err(|e| startup_error("Failed to load lexicon tables", e))?;

    info!(
        "Tables loaded: {} interests, {} age words, {} rules",
        tables.lexicon.interests().len(),
        tables.lexicon.age_words().len(),
        tables.rules.len()
    );

    let limits = settings.recommendations.limits();
    let recommender = Recommender::new(Arc::new(tables), limits);

    info!("Recommender initialized with limits: {:?}", limits);

    let catalog = CatalogClient::new(settings.catalog.base_url.clone(), settings.catalog.timeout_secs)
        .map_err(|e| startup_error("Failed to create catalog client", e))?;
    let cache = CatalogCache::new(settings.cache.max_entries, settings.cache.ttl_secs);

    info!(
        "Catalog client for {} (cache TTL: {}s)",
        settings.catalog.base_url, settings.cache.ttl_secs
    );

    let app_state = AppState::new(recommender, catalog, cache);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
