use crate::db::log::dtlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::close_latest_open_downtime;
use crate::errors::AppResult;
use crate::models::downtime::Resolution;
use chrono::NaiveDateTime;
use tracing::{info, warn};

/// Matches a resolution message to the open downtime it ends.
pub struct DowntimeResolver;

impl DowntimeResolver {
    /// Close the newest open interval for `(workshop, unit)` at `end_time`.
    ///
    /// A key without an open interval yields [`Resolution::NotFound`], not an
    /// error. Only store failures are returned as `Err`.
    pub fn resolve(
        pool: &mut DbPool,
        workshop: &str,
        unit: &str,
        end_time: &NaiveDateTime,
    ) -> AppResult<Resolution> {
        let resolution = close_latest_open_downtime(&mut pool.conn, workshop, unit, end_time)?;

        match &resolution {
            Resolution::Closed { start, end } => {
                info!(workshop, unit, start = %start, end = %end, "downtime closed");
                dtlog_quiet(
                    &pool.conn,
                    "downtime_end",
                    &format!("{}/{}", workshop, unit),
                    &resolution.to_string(),
                );
            }
            Resolution::NotFound => {
                warn!(workshop, unit, "no open downtime to close");
            }
        }

        Ok(resolution)
    }
}
