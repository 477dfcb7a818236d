use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { period } = cmd {
        let mut pool = open_db(&cfg.database)?;
        let now = Local::now().naive_local();
        let text = ReportLogic::build(&mut pool, *period, &now)?;
        println!("{}", text);
    }

    Ok(())
}
