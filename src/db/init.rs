use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open the database at the configured path, creating it and its tables if needed.
pub fn init_db(db_path: &Path) -> Result<Connection> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    let conn = Connection::open(db_path).context("Failed to open database connection")?;
    prepare(conn)
}

/// Private in-memory database with the same pragmas and tables as `init_db`.
pub fn init_memory_db() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
    prepare(conn)
}

fn prepare(conn: Connection) -> Result<Connection> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .context("Failed to enable foreign keys")?;

    migrate(&conn)?;

    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS webinars (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'SCHEDULED',
            cta_type TEXT NOT NULL DEFAULT 'BOOK_A_CALL',
            cta_label TEXT NOT NULL,
            ai_agent_id TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            start_time TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create webinars table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS attendees (
            id TEXT PRIMARY KEY,
            webinar_id TEXT NOT NULL REFERENCES webinars(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            call_status TEXT NOT NULL DEFAULT 'PENDING',
            stage TEXT NOT NULL DEFAULT 'REGISTERED',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create attendees table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_attendees_webinar_id ON attendees(webinar_id)",
        [],
    )
    .context("Failed to create attendees webinar_id index")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_webinars_start_time ON webinars(start_time DESC)",
        [],
    )
    .context("Failed to create webinars start_time index")?;

    Ok(())
}
