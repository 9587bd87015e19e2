use rusqlite::ffi::sqlite3_auto_extension;
use rusqlite::{Connection, OpenFlags};
use sqlite_vec::sqlite3_vec_init;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, error, info};

use crate::config::ConnectionTarget;
use crate::error::{Result, StoreError};

/// Return code of the one-time `sqlite-vec` registration
static VEC_REGISTRATION: OnceLock<i32> = OnceLock::new();

/// Register `sqlite-vec` as an auto-extension so every connection opened
/// afterwards in this process has the `vec0` module and `vec_*` functions.
pub fn register_vec_extension() -> Result<()> {
    let rc = *VEC_REGISTRATION.get_or_init(|| {
        // SAFETY: sqlite3_vec_init has the SQLite extension entry point ABI;
        // the transmute only restores the exact signature the binding expects.
        unsafe {
            sqlite3_auto_extension(Some(std::mem::transmute(sqlite3_vec_init as *const ())))
        }
    });

    if rc != rusqlite::ffi::SQLITE_OK {
        return Err(StoreError::initialization(format!(
            "Failed to register sqlite-vec extension (code {rc})"
        )));
    }
    Ok(())
}

/// Owns the store's single SQLite connection
#[derive(Debug)]
pub struct DatabaseManager {
    target: ConnectionTarget,
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseManager {
    /// Open a connection for `target` with the vector extension loaded.
    ///
    /// The first call registers `sqlite-vec` as a process-wide auto-extension,
    /// so every SQLite connection the host process opens afterwards, through
    /// this crate or not, also gets `vec0` and the `vec_*` functions.
    pub fn open(target: &ConnectionTarget) -> Result<Self> {
        register_vec_extension()?;

        let connection = match target {
            ConnectionTarget::InMemory => connect_in_memory()?,
            ConnectionTarget::File(path) => connect_file(path)?,
        };

        let version = vec_version(&connection).map_err(|e| {
            StoreError::initialization(format!("sqlite-vec is not available: {e}"))
        })?;

        info!(
            connection = %target,
            sqlite_vec = %version,
            "Vector database connection opened"
        );

        Ok(Self {
            target: target.clone(),
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(&ConnectionTarget::InMemory)
    }

    pub fn with_connection<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<R>,
    {
        let conn = self.connection.lock()?;
        Ok(f(&conn)?)
    }

    /// Like `with_connection`, for closures that already speak the store's error type
    pub fn with_connection_store<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> Result<R>,
    {
        let conn = self.connection.lock()?;
        f(&conn)
    }

    /// Run `f` inside one transaction, committing on success and rolling back on error
    pub fn with_transaction<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> Result<R>,
    {
        let conn = self.connection.lock()?;
        let tx = conn.unchecked_transaction()?;

        match f(&conn) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback() {
                    error!("Failed to rollback transaction: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    pub fn check_integrity(&self) -> Result<bool> {
        self.with_connection(|conn| {
            let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            Ok(result == "ok")
        })
    }

    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }
}

impl Clone for DatabaseManager {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            connection: Arc::clone(&self.connection),
        }
    }
}

fn connect_in_memory() -> Result<Connection> {
    let connection = Connection::open_in_memory()
        .map_err(|e| StoreError::initialization(format!("Failed to open in-memory database: {e}")))?;

    connection
        .prepare("PRAGMA cache_size = -32000")?
        .query_map([], |_| Ok(()))?
        .for_each(drop); // 32MB cache for in-memory

    debug!("In-memory database opened");
    Ok(connection)
}

fn connect_file(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            StoreError::initialization(format!(
                "Failed to create database directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let connection = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )
    .map_err(|e| {
        StoreError::initialization(format!(
            "Failed to open database at {}: {e}",
            path.display()
        ))
    })?;

    // Some PRAGMA statements return values, so we need to consume them
    connection
        .prepare("PRAGMA journal_mode = WAL")?
        .query_map([], |_| Ok(()))?
        .for_each(drop);
    connection
        .prepare("PRAGMA synchronous = NORMAL")?
        .query_map([], |_| Ok(()))?
        .for_each(drop);
    connection
        .prepare("PRAGMA cache_size = -64000")?
        .query_map([], |_| Ok(()))?
        .for_each(drop); // 64MB cache

    debug!(path = %path.display(), "Database file opened");
    Ok(connection)
}

fn vec_version(conn: &Connection) -> rusqlite::Result<String> {
    conn.query_row("SELECT vec_version()", [], |row| row.get(0))
}
