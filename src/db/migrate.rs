use rusqlite::{Connection, Error, OptionalExtension, Result};
use tracing::{info, warn};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the `downtimes` table. Times are stored as `YYYY-MM-DD HH:MM:SS`.
fn create_downtimes_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS downtimes (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            workshop_num TEXT NOT NULL,
            unit_num     TEXT NOT NULL,
            start_time   TEXT NOT NULL,
            end_time     TEXT
        );
        "#,
    )?;
    Ok(())
}

fn create_errors_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS errors (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            workshop_num TEXT NOT NULL,
            unit_num     TEXT NOT NULL,
            time         TEXT NOT NULL,
            info         TEXT NOT NULL DEFAULT '',
            author       TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

fn ensure_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_downtimes_key_open ON downtimes(workshop_num, unit_num, end_time);
        CREATE INDEX IF NOT EXISTS idx_downtimes_start ON downtimes(start_time);
        CREATE INDEX IF NOT EXISTS idx_errors_time ON errors(time);
        "#,
    )?;
    Ok(())
}

/// Early databases created `errors` without the `author` column.
fn migrate_add_author_to_errors(conn: &Connection) -> Result<(), Error> {
    let version = "20250310_0002_add_error_author";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "errors", "author")? {
        warn!(version, "adding 'author' column to errors table");
        conn.execute(
            "ALTER TABLE errors ADD COLUMN author TEXT NOT NULL DEFAULT '';",
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'author' column: {}", e)),
            )
        })?;
        info!(version, "migration applied: added 'author' to errors table");
    }

    mark_applied(conn, version, "Added author to errors")?;
    Ok(())
}

/// Time-only start/end values (`HH:MM:SS`) cannot be compared against a
/// cutoff; prefix them with the date part of the row's own start, or today.
fn migrate_time_only_timestamps(conn: &Connection) -> Result<(), Error> {
    let version = "20250322_0003_full_timestamps";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let fixed = conn.execute(
        "UPDATE downtimes
         SET start_time = date('now', 'localtime') || ' ' || start_time
         WHERE length(start_time) = 8",
        [],
    )?;
    let fixed_end = conn.execute(
        "UPDATE downtimes
         SET end_time = substr(start_time, 1, 10) || ' ' || end_time
         WHERE end_time IS NOT NULL AND length(end_time) = 8",
        [],
    )?;

    if fixed + fixed_end > 0 {
        warn!(
            version,
            normalized = fixed + fixed_end,
            "normalized time-only downtime values to full timestamps"
        );
    }

    mark_applied(conn, version, "Normalized downtime timestamps")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called from db::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create tables if missing
    if !table_exists(conn, "downtimes")? {
        create_downtimes_table(conn)?;
        info!("created downtimes table");
    }

    if !table_exists(conn, "errors")? {
        create_errors_table(conn)?;
        info!("created errors table");
    }

    ensure_indexes(conn)?;

    // 3) Upgrade schemas written by older releases
    migrate_add_author_to_errors(conn)?;
    migrate_time_only_timestamps(conn)?;

    Ok(())
}
