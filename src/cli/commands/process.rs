use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::db::initialize::open_db;
use crate::errors::{AppError, AppResult};
use crate::models::message::{RawMessage, parse_timestamp};
use crate::ui::messages::{error, relay};

/// Run one message through the pipeline and print its summary.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Process { text, author, at } = cmd {
        let message = match at {
            Some(ts) => {
                let when =
                    parse_timestamp(ts).ok_or_else(|| AppError::InvalidTimestamp(ts.clone()))?;
                RawMessage::new(text.as_str(), when, author.as_str())
            }
            None => RawMessage::now(text.as_str(), author.as_str()),
        };

        let mut pool = open_db(&cfg.database)?;
        let pipeline = Pipeline::from_config(cfg)?;

        let summary = pipeline.process(&mut pool, &message);
        relay(&cfg.recipient, &summary);

        if summary.is_failure() {
            error("Message could not be fully processed; see the status line above.");
        }
    }

    Ok(())
}
