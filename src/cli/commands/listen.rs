use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::core::purge::PurgeLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::message::RawMessage;
use crate::ui::messages::{error, relay};
use chrono::Local;
use std::io::{self, BufRead};
use tracing::{info, warn};

/// Relay loop: every non-blank stdin line is one chat message.
///
/// A message that fails (model or store) is reported and the loop moves on;
/// only a broken stdin ends it early.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Listen { author, no_purge } = cmd {
        let mut pool = open_db(&cfg.database)?;
        let pipeline = Pipeline::from_config(cfg)?;

        if !*no_purge {
            let now = Local::now().naive_local();
            if let Err(e) = PurgeLogic::run(&mut pool, cfg.retention_days, &now) {
                warn!(error = %e, "startup purge failed");
            }
        }

        info!(recipient = %cfg.recipient, "listening for messages on stdin");

        let stdin = io::stdin();
        let mut processed = 0usize;
        let mut failed = 0usize;

        for line in stdin.lock().lines() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            let message = RawMessage::now(text, author.as_str());
            let summary = pipeline.process(&mut pool, &message);
            relay(&cfg.recipient, &summary);

            processed += 1;
            if summary.is_failure() {
                failed += 1;
                error(format!("Message from {} was not fully processed", message.author));
            }
        }

        info!(processed, failed, "stdin closed");
    }

    Ok(())
}
