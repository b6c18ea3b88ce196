use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const HOST: &str = "HOST";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const DB_POOL_SIZE: &str = "DB_POOL_SIZE";
    /// Mount point for the resource routes, e.g. "/api". Empty by default.
    pub const API_PREFIX: &str = "API_PREFIX";
    /// "advisory" (default) or "enforced"
    pub const NOTE_FOLDER_POLICY: &str = "NOTE_FOLDER_POLICY";
    /// Single allowed CORS origin. Unset means any origin.
    pub const CORS_ORIGIN: &str = "CORS_ORIGIN";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8000;
    pub const HOST: &str = "127.0.0.1";
    pub const DATABASE_URL: &str = "./.db/noteful.db";
    pub const DB_POOL_SIZE: u32 = 8;
    pub const API_PREFIX: &str = "";
}

/// Whether a note's `folder_id` has to name an existing folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderRefPolicy {
    /// Any integer is stored as given
    #[default]
    Advisory,
    /// Writes naming a missing folder are rejected as validation errors
    Enforced,
}

impl FolderRefPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FolderRefPolicy::Advisory => "advisory",
            FolderRefPolicy::Enforced => "enforced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "advisory" => Some(FolderRefPolicy::Advisory),
            "enforced" => Some(FolderRefPolicy::Enforced),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_pool_size: u32,
    pub api_prefix: String,
    pub folder_ref_policy: FolderRefPolicy,
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            database_url: defaults::DATABASE_URL.to_string(),
            db_pool_size: defaults::DB_POOL_SIZE,
            api_prefix: defaults::API_PREFIX.to_string(),
            folder_ref_policy: FolderRefPolicy::default(),
            cors_origin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let db_pool_size = match env::var(env_vars::DB_POOL_SIZE) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Invalid {}={:?}, using {}", env_vars::DB_POOL_SIZE, raw, defaults::DB_POOL_SIZE);
                defaults::DB_POOL_SIZE
            }),
            Err(_) => defaults::DB_POOL_SIZE,
        };

        let folder_ref_policy = match env::var(env_vars::NOTE_FOLDER_POLICY) {
            Ok(raw) => FolderRefPolicy::from_str(&raw).unwrap_or_else(|| {
                log::warn!("Invalid {}={:?}, using advisory", env_vars::NOTE_FOLDER_POLICY, raw);
                FolderRefPolicy::Advisory
            }),
            Err(_) => FolderRefPolicy::default(),
        };

        Self {
            host: env::var(env_vars::HOST).unwrap_or_else(|_| defaults::HOST.to_string()),
            port: env::var(env_vars::PORT)
                .unwrap_or_else(|_| defaults::PORT.to_string())
                .parse()
                .expect("PORT must be a valid number"),
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            db_pool_size,
            api_prefix: normalize_prefix(
                &env::var(env_vars::API_PREFIX).unwrap_or_else(|_| defaults::API_PREFIX.to_string()),
            ),
            folder_ref_policy,
            cors_origin: env::var(env_vars::CORS_ORIGIN).ok().filter(|s| !s.trim().is_empty()),
        }
    }
}

/// "api", "/api/" and "/api" all become "/api"; "" and "/" become "".
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
