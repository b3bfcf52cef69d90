use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use intern_match::config::{CorsSettings, DatabaseBackend, LoggingSettings, Settings};
use intern_match::core::Matcher;
use intern_match::models::ScoringWeights;
use intern_match::routes::{self, AppState};
use intern_match::services::{InMemoryStore, PostgresStore, RecordStore};
use std::io::{Error, ErrorKind};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.init(),
    }
}

fn build_cors(settings: &CorsSettings) -> Cors {
    if settings.allows_any_origin() {
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
    }

    settings
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        Error::new(ErrorKind::InvalidInput, e)
    })?;

    init_logging(&settings.logging);

    info!("Starting Intern Match service...");

    let store: Arc<dyn RecordStore> = match settings.database.backend {
        DatabaseBackend::Memory => {
            info!("Using in-memory record store");
            Arc::new(InMemoryStore::new())
        }
        DatabaseBackend::Postgres => {
            let url = settings.database.url.as_deref().ok_or_else(|| {
                error!("database.url (or DATABASE_URL) is required for the postgres backend");
                Error::new(ErrorKind::InvalidInput, "missing database url")
            })?;

            let store = PostgresStore::from_settings(
                url,
                settings.database.max_connections,
                settings.database.min_connections,
                settings.database.acquire_timeout_secs,
                settings.database.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                Error::new(ErrorKind::Other, e)
            })?;

            info!(
                "PostgreSQL store initialized (max: {} connections)",
                settings.database.max_connections.unwrap_or(10)
            );
            Arc::new(store)
        }
    };

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);
    info!(
        "Configured CORS allowed origins: {:?}, allow_credentials={}",
        settings.cors.allowed_origins,
        settings.cors.allow_credentials()
    );

    let app_state = AppState {
        store,
        matcher,
        default_top_n: settings.matching.default_top_n,
        cors: settings.cors.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .wrap(build_cors(&app_state.cors))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
