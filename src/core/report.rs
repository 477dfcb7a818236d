//! Downtime and error reports for the `report` command.

use crate::db::pool::DbPool;
use crate::db::queries::{query_error_events, query_intervals, query_open_intervals};
use crate::errors::AppResult;
use crate::utils::table::Table;
use chrono::{Duration, NaiveDateTime};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportPeriod {
    /// Downtimes that have not ended yet
    Active,
    /// Downtimes of the last 24 hours
    Day,
    /// Downtimes of the last 7 days
    Week,
    /// Downtimes of the last 30 days
    Month,
    /// Error reports of the last 30 days
    Errors,
}

impl ReportPeriod {
    /// Look-back window; `None` for the open-interval report.
    pub fn window(&self) -> Option<Duration> {
        match self {
            ReportPeriod::Active => None,
            ReportPeriod::Day => Some(Duration::days(1)),
            ReportPeriod::Week => Some(Duration::weeks(1)),
            ReportPeriod::Month | ReportPeriod::Errors => Some(Duration::days(30)),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ReportPeriod::Active => "Активные простои:",
            ReportPeriod::Day => "Простои за последний день:",
            ReportPeriod::Week => "Простои за последнюю неделю:",
            ReportPeriod::Month => "Простои за последний месяц:",
            ReportPeriod::Errors => "Ошибки за последний месяц:",
        }
    }

    fn empty_text(&self) -> &'static str {
        match self {
            ReportPeriod::Active => "Нет активных простоев.",
            ReportPeriod::Day => "Нет данных о простоях за день.",
            ReportPeriod::Week => "Нет данных о простоях за неделю.",
            ReportPeriod::Month => "Нет данных о простоях за месяц.",
            ReportPeriod::Errors => "Нет данных об ошибках за месяц.",
        }
    }
}

pub struct ReportLogic;

impl ReportLogic {
    /// Build the textual report for `period`, relative to `now`.
    pub fn build(pool: &mut DbPool, period: ReportPeriod, now: &NaiveDateTime) -> AppResult<String> {
        let table = match (period, period.window()) {
            (ReportPeriod::Active, _) | (_, None) => {
                let mut t = Table::new(&["Цех", "Агрегат", "Начало"]);
                for d in query_open_intervals(&pool.conn)? {
                    t.add_row(vec![d.workshop, d.unit, d.start_time]);
                }
                t
            }
            (ReportPeriod::Errors, Some(window)) => {
                let mut t = Table::new(&["Цех", "Агрегат", "Время", "Автор", "Информация"]);
                for e in query_error_events(&pool.conn, &(*now - window), now)? {
                    t.add_row(vec![e.workshop, e.unit, e.time, e.author, e.info]);
                }
                t
            }
            (_, Some(window)) => {
                let mut t = Table::new(&["Цех", "Агрегат", "Начало", "Конец"]);
                for d in query_intervals(&pool.conn, &(*now - window), now)? {
                    let end = d.end_or_marker().to_string();
                    t.add_row(vec![d.workshop, d.unit, d.start_time, end]);
                }
                t
            }
        };

        if table.is_empty() {
            return Ok(period.empty_text().to_string());
        }

        Ok(format!("{}\n{}", period.title(), table.render()))
    }
}
