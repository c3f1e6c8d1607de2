// SQLite database setup
// One store per project; created on first use, never migrated
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database unavailable at {}: {reason}", .path.display())]
    Unavailable { path: PathBuf, reason: String },
}

pub type DbResult<T> = Result<T, DbError>;

// Other tool instances may hold the write lock briefly
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Shared database connection wrapper
#[derive(Debug)]
pub struct DbConnection {
    conn: Arc<Mutex<Connection>>,
}

impl DbConnection {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock still guards a usable connection; SQLite rolls back
        // any transaction the panicking holder left open.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// In-memory store with both tables, for tests
    #[cfg(test)]
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        Ok(DbConnection::new(conn))
    }
}

impl Clone for DbConnection {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

/// Open the store at `path`.
///
/// An absent file is created together with its tables. An existing file is
/// opened without the create flag and probed; any failure there is reported
/// as `DbError::Unavailable`.
pub fn open_project_db(path: &Path) -> DbResult<DbConnection> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        create_tables(&conn)?;

        log::info!("Database created at {}", path.display());
        return Ok(DbConnection::new(conn));
    }

    log::info!("Reading database {}", path.display());

    let unavailable = |e: rusqlite::Error| DbError::Unavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(unavailable)?;
    conn.busy_timeout(BUSY_TIMEOUT).map_err(unavailable)?;
    probe_tables(&conn).map_err(unavailable)?;

    Ok(DbConnection::new(conn))
}

fn create_tables(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS ObjectID (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            objectID INTEGER,
            assetName TEXT,
            assetPath TEXT,
            owner TEXT,
            matteIDs TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS MatteID (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            matteID INTEGER,
            colorTag TEXT,
            multiMatteName TEXT,
            materialName TEXT
        )",
        [],
    )?;

    Ok(())
}

// Fails on files that are not SQLite databases or lack either table
fn probe_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.query_row("SELECT COUNT(*) FROM ObjectID", [], |row| row.get::<_, i64>(0))?;
    conn.query_row("SELECT COUNT(*) FROM MatteID", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}
