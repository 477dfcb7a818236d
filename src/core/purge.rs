use crate::db::log::dtlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::purge_intervals_older_than;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;
use tracing::info;

/// Default retention for downtime intervals.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

pub struct PurgeLogic;

impl PurgeLogic {
    /// Delete downtime intervals that started more than `days` before `now`.
    /// Error reports are kept.
    pub fn run(pool: &mut DbPool, days: i64, now: &NaiveDateTime) -> AppResult<usize> {
        if days < 0 {
            return Err(AppError::InvalidRetention(days));
        }

        let deleted = purge_intervals_older_than(&pool.conn, days, now)?;
        info!(days, deleted, "purged old downtimes");

        if deleted > 0 {
            dtlog_quiet(
                &pool.conn,
                "purge",
                &format!("older than {} days", days),
                &format!("Deleted {} downtime intervals", deleted),
            );
        }

        Ok(deleted)
    }
}
