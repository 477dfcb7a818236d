use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::purge::PurgeLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::success;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Purge { days } = cmd {
        let days = days.unwrap_or(cfg.retention_days);
        let mut pool = open_db(&cfg.database)?;
        let now = Local::now().naive_local();

        let deleted = PurgeLogic::run(&mut pool, days, &now)?;
        success(format!(
            "Deleted {} downtime interval(s) older than {} days",
            deleted, days
        ));
    }

    Ok(())
}
