use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use noteful_backend::config::Config;
use noteful_backend::db::Database;
use noteful_backend::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Noteful backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let (host, port) = (config.host.clone(), config.port);

    log::info!("Initializing database at {}", config.database_url);
    let db = match Database::new(&config.database_url, config.db_pool_size) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("{}", e);
            return Err(std::io::Error::other(e));
        }
    };

    log::info!("Note folder reference policy: {}", config.folder_ref_policy.as_str());
    if config.api_prefix.is_empty() {
        log::info!("Serving folders and notes at the root");
    } else {
        log::info!("Serving folders and notes under {}", config.api_prefix);
    }

    let server = HttpServer::new(move || {
        let cors = match &config.cors_origin {
            Some(origin) => Cors::default().allowed_origin(origin),
            None => Cors::default().allow_any_origin(),
        }
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

        let api_prefix = config.api_prefix.clone();

        App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                config: config.clone(),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(move |cfg| noteful_backend::configure(cfg, &api_prefix))
    })
    .bind((host.as_str(), port))?
    .run();

    log::info!("Listening on http://{}:{}", host, port);

    let server_handle = server.handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            log::warn!("Failed to listen for Ctrl+C, graceful shutdown disabled");
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
