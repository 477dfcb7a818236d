use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::colors::{CYAN, RED, RESET};

/// `db` maintenance: flags run in the order migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        println!("{}▶ Running migrations…{}", CYAN, RESET);
        run_pending_migrations(&pool.conn)?;
        success("Migration completed.");
    }

    if *info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *check {
        println!("{}▶ Checking database…{}", CYAN, RESET);

        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
        if integrity == "ok" {
            success("Integrity check passed.");
        } else {
            println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
        }

        let anomalies = stats::ledger_anomalies(&pool)?;
        if anomalies.inverted > 0 {
            warning(format!(
                "{} downtime interval(s) end before they start",
                anomalies.inverted
            ));
        }
        if anomalies.partial_timestamps > 0 {
            warning(format!(
                "{} downtime row(s) lack a date part; run `db --migrate`",
                anomalies.partial_timestamps
            ));
        }
    }

    if *vacuum {
        println!("{}▶ Running VACUUM…{}", CYAN, RESET);
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}
