//! Noteful backend: folders and notes over a REST interface backed by SQLite.

use actix_web::web;
use std::sync::Arc;

pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod sanitize;

use config::Config;
use db::Database;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
}

/// Mount every route. Resource routes live under `api_prefix` ("" for the
/// root); the health endpoints always stay at the root.
pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler));
    controllers::health::config_routes(cfg);
    cfg.service(
        web::scope(api_prefix)
            .configure(controllers::folders::config)
            .configure(controllers::notes::config),
    );
}
