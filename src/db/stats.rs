use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let downtimes: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM downtimes", [], |row| row.get(0))?;
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM downtimes WHERE end_time IS NULL",
        [],
        |row| row.get(0),
    )?;
    let errors: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM errors", [], |row| row.get(0))?;

    println!(
        "{}• Downtimes:{} {}{}{} ({} open)",
        CYAN, RESET, GREEN, downtimes, RESET, open
    );
    println!("{}• Error reports:{} {}{}{}", CYAN, RESET, GREEN, errors, RESET);

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_time FROM downtimes ORDER BY start_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_time FROM downtimes ORDER BY start_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Downtime range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}

/// Ledger rows no normal flow can produce: an end before its start, or a
/// timestamp without a date part.
pub struct LedgerAnomalies {
    pub inverted: i64,
    pub partial_timestamps: i64,
}

pub fn ledger_anomalies(pool: &DbPool) -> rusqlite::Result<LedgerAnomalies> {
    let inverted = pool.conn.query_row(
        "SELECT COUNT(*) FROM downtimes
         WHERE end_time IS NOT NULL AND datetime(end_time) < datetime(start_time)",
        [],
        |row| row.get(0),
    )?;
    let partial_timestamps = pool.conn.query_row(
        "SELECT COUNT(*) FROM downtimes
         WHERE length(start_time) <> 19 OR (end_time IS NOT NULL AND length(end_time) <> 19)",
        [],
        |row| row.get(0),
    )?;

    Ok(LedgerAnomalies {
        inverted,
        partial_timestamps,
    })
}
