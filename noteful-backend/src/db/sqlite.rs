//! SQLite connection pool and schema bootstrap

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use thiserror::Error;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

const MEMORY_URL: &str = ":memory:";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS folders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(trim(name)) > 0)
    );

    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(trim(name)) > 0),
        content TEXT,
        folder_id INTEGER
    );

    CREATE INDEX IF NOT EXISTS idx_notes_folder_id ON notes(folder_id);
";

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error("Failed to create database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build connection pool: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Failed to initialize schema: {0}")]
    Schema(#[from] rusqlite::Error),
}

/// Owns the connection pool. Cheap to share behind an `Arc`; hands out one
/// pooled connection per store call.
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (or create) the database at `database_url` and make sure both
    /// tables exist. `:memory:` gives a private in-memory database held by a
    /// single pooled connection, so every caller sees the same data.
    pub fn new(database_url: &str, pool_size: u32) -> Result<Self, DbInitError> {
        let in_memory = database_url == MEMORY_URL;

        let manager = if in_memory {
            SqliteConnectionManager::memory()
        } else {
            if let Some(parent) = Path::new(database_url).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            SqliteConnectionManager::file(database_url)
        }
        .with_init(|conn| conn.execute_batch("PRAGMA busy_timeout = 5000;"));

        let builder = Pool::builder();
        let pool = if in_memory {
            // Dropping the only connection would drop the data with it.
            builder
                .max_size(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .build(manager)?
        } else {
            builder.max_size(pool_size.max(1)).build(manager)?
        };

        let conn = pool.get()?;
        if !in_memory {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch(SCHEMA)?;
        drop(conn);

        log::debug!("[DB] Schema ready at {}", database_url);
        Ok(Self { pool })
    }

    /// Check out a connection from the pool
    pub fn conn(&self) -> Result<DbConn, r2d2::Error> {
        self.pool.get()
    }
}
