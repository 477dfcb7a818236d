//! Record store operations on the `downtimes` and `errors` tables.

use crate::errors::AppResult;
use crate::models::downtime::{DowntimeInterval, Resolution};
use crate::models::error_event::ErrorEvent;
use crate::models::message::TIMESTAMP_FMT;
use chrono::{Duration, NaiveDateTime};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Result, Row, TransactionBehavior, params};

fn fmt_ts(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FMT).to_string()
}

/// Read an identifier column as text.
///
/// Databases created by older releases declared workshop/unit as INTEGER,
/// so numeric identifiers may come back as integers.
fn get_ident(row: &Row, col: &str) -> Result<String> {
    match row.get_ref(col)? {
        ValueRef::Integer(i) => Ok(i.to_string()),
        ValueRef::Real(f) => Ok(f.to_string()),
        ValueRef::Text(t) => Ok(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Null => Ok(String::new()),
        ValueRef::Blob(b) => Ok(String::from_utf8_lossy(b).into_owned()),
    }
}

pub fn map_downtime_row(row: &Row) -> Result<DowntimeInterval> {
    Ok(DowntimeInterval {
        id: row.get("id")?,
        workshop: get_ident(row, "workshop_num")?,
        unit: get_ident(row, "unit_num")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
    })
}

pub fn map_error_row(row: &Row) -> Result<ErrorEvent> {
    Ok(ErrorEvent {
        id: row.get("id")?,
        workshop: get_ident(row, "workshop_num")?,
        unit: get_ident(row, "unit_num")?,
        time: row.get("time")?,
        info: row.get::<_, Option<String>>("info")?.unwrap_or_default(),
        author: row.get::<_, Option<String>>("author")?.unwrap_or_default(),
    })
}

/// Open a new downtime interval. Always inserts, even if the same key
/// already has an open interval.
pub fn insert_downtime_start(
    conn: &Connection,
    workshop: &str,
    unit: &str,
    start_time: &NaiveDateTime,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO downtimes (workshop_num, unit_num, start_time) VALUES (?1, ?2, ?3)",
        params![workshop, unit, fmt_ts(start_time)],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Close the most recently inserted open interval for `(workshop, unit)`.
///
/// The lookup and the update share one IMMEDIATE transaction, so two
/// resolutions for the same key cannot both close the same row.
pub fn close_latest_open_downtime(
    conn: &mut Connection,
    workshop: &str,
    unit: &str,
    end_time: &NaiveDateTime,
) -> AppResult<Resolution> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let open: Option<(i64, String)> = tx
        .query_row(
            "SELECT id, start_time FROM downtimes
             WHERE workshop_num = ?1 AND unit_num = ?2 AND end_time IS NULL
             ORDER BY id DESC
             LIMIT 1",
            params![workshop, unit],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let Some((id, start)) = open else {
        return Ok(Resolution::NotFound);
    };

    let end = fmt_ts(end_time);
    tx.execute(
        "UPDATE downtimes SET end_time = ?1 WHERE id = ?2",
        params![end, id],
    )?;
    tx.commit()?;

    Ok(Resolution::Closed { start, end })
}

pub fn insert_error_event(
    conn: &Connection,
    workshop: &str,
    unit: &str,
    time: &NaiveDateTime,
    info: &str,
    author: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO errors (workshop_num, unit_num, time, info, author)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![workshop, unit, fmt_ts(time), info, author],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Intervals that started, or ended, inside `[since, until]`.
pub fn query_intervals(
    conn: &Connection,
    since: &NaiveDateTime,
    until: &NaiveDateTime,
) -> AppResult<Vec<DowntimeInterval>> {
    let mut stmt = conn.prepare(
        "SELECT id, workshop_num, unit_num, start_time, end_time
         FROM downtimes
         WHERE datetime(start_time) BETWEEN datetime(?1) AND datetime(?2)
            OR (end_time IS NOT NULL AND datetime(end_time) BETWEEN datetime(?1) AND datetime(?2))
         ORDER BY start_time ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![fmt_ts(since), fmt_ts(until)], map_downtime_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn query_open_intervals(conn: &Connection) -> AppResult<Vec<DowntimeInterval>> {
    let mut stmt = conn.prepare(
        "SELECT id, workshop_num, unit_num, start_time, end_time
         FROM downtimes
         WHERE end_time IS NULL
         ORDER BY start_time ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_downtime_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete intervals whose start predates `now - days`, open or closed.
/// Returns the number of deleted rows.
///
/// A retention reaching past the earliest representable date deletes nothing.
pub fn purge_intervals_older_than(
    conn: &Connection,
    days: i64,
    now: &NaiveDateTime,
) -> AppResult<usize> {
    let Some(cutoff) = Duration::try_days(days).and_then(|d| now.checked_sub_signed(d)) else {
        return Ok(0);
    };
    let deleted = conn.execute(
        "DELETE FROM downtimes WHERE datetime(start_time) < datetime(?1)",
        [fmt_ts(&cutoff)],
    )?;
    Ok(deleted)
}

pub fn query_error_events(
    conn: &Connection,
    since: &NaiveDateTime,
    until: &NaiveDateTime,
) -> AppResult<Vec<ErrorEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, workshop_num, unit_num, time, info, author
         FROM errors
         WHERE datetime(time) BETWEEN datetime(?1) AND datetime(?2)
         ORDER BY time ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![fmt_ts(since), fmt_ts(until)], map_error_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_intervals(conn: &Connection) -> AppResult<Vec<DowntimeInterval>> {
    let mut stmt = conn.prepare(
        "SELECT id, workshop_num, unit_num, start_time, end_time
         FROM downtimes
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], map_downtime_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
