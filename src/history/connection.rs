/*!
 * History database connection.
 *
 * SQLite calls are blocking, so every query goes through `execute_async`,
 * which runs the closure on tokio's blocking pool.
 */

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::schema;

/// `<data dir>/signbridge/history.db`
pub fn default_database_path() -> Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .ok_or_else(|| anyhow!("Could not determine data directory"))?;

    Ok(base_dir.join("signbridge").join("history.db"))
}

/// Shared handle on one SQLite connection with an initialized schema
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    pub fn new_default() -> Result<Self> {
        Self::new(default_database_path()?)
    }

    /// Open (or create) the database file, creating missing parent directories
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        info!("Opening history database at: {:?}", db_path);
        let conn = Connection::open(db_path).with_context(|| format!("Failed to open database: {:?}", db_path))?;
        Self::with_schema(conn)
    }

    /// In-memory database, gone when the last clone is dropped
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory history database");
        Self::with_schema(Connection::open_in_memory().context("Failed to create in-memory database")?)
    }

    fn with_schema(conn: Connection) -> Result<Self> {
        schema::initialize_schema(&conn)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure with the connection on the blocking pool
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.connection);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| anyhow!("History database lock poisoned: {}", e))?;
            f(&conn)
        })
        .await
        .context("History database task panicked")?
    }
}
