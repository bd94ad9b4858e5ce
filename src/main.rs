mod api;
mod config;
mod database;
mod graphql;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use services::{SharedUserStore, UserService};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting users gateway...");
    log::info!("📊 Datastore: {} (alias: {})", config.datastore_url, config.index_alias);

    let es = database::Elasticsearch::new(&config.datastore_url, &config.index_alias)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let es = Arc::new(es);

    match es.ping().await {
        Ok(()) => log::info!("✅ Elasticsearch reachable"),
        Err(e) => log::warn!("⚠️  Elasticsearch not reachable yet: {}", e),
    }

    std::fs::create_dir_all(&config.public_dir)?;
    if config.auth.required {
        log::info!("🔐 Bearer tokens required for mutations");
    }

    let store: SharedUserStore = Arc::new(UserService::new(es.clone(), config.search_size));
    let schema = graphql::build_schema(store, config.auth.clone(), config.public_dir.clone());

    let schema_data = web::Data::new(schema);
    let es_data = web::Data::from(es.clone());
    let auth = config.auth.clone();
    let public_dir = config.public_dir.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("🧭 GraphQL endpoint at: http://{}:{}/graphql", config.host, config.port);

    HttpServer::new(move || {
        let public_dir = public_dir.clone();

        App::new()
            .app_data(schema_data.clone())
            .app_data(es_data.clone())
            .wrap(middleware::BearerAuth::new(auth.clone()))
            .wrap(middleware::json_errors())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(|cfg| api::configure(cfg, &public_dir))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    log::info!("👋 Server stopped, closing datastore client");
    drop(es);

    Ok(())
}
