use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use env_logger::Builder;
use log::{debug, info, warn, LevelFilter};
use std::sync::Arc;

use chirpy::config::Config;
use chirpy::metrics::CountVisits;
use chirpy::state::AppState;
use chirpy::store::ScyllaStore;
use chirpy::{db, handlers};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    if let Err(err) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", err);
    }
    let config = Config::from_env().context("invalid configuration")?;

    info!("Starting Chirpy backend...");
    let session = db::create_session(&config.db_url)
        .await
        .context("failed to create database session")?;
    db::ensure_schema(&session)
        .await
        .context("failed to create schema")?;
    info!("Connected to ScyllaDB at {}", config.db_url);

    if !config.platform.is_dev() {
        warn!("PLATFORM is not 'dev'; admin reset will not delete users");
    }

    let store = Arc::new(ScyllaStore::new(Arc::new(session)));
    let state = AppState::new(store, config.platform);
    let filepath_root = config.filepath_root.clone();

    info!(
        "Serving files from {} on port {}",
        filepath_root.display(),
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure)
            .service(
                web::scope("/app")
                    .wrap(CountVisits::new(Arc::clone(&state.hits)))
                    .service(Files::new("", &filepath_root).index_file("index.html")),
            )
    })
    .workers(config.workers)
    .bind(("0.0.0.0", config.port))?
    .run()
    .await?;

    Ok(())
}
