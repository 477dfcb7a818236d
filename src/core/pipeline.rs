//! Message-to-record pipeline: prompt → model → parser → store → summary.

use crate::config::Config;
use crate::core::parser;
use crate::core::resolver::DowntimeResolver;
use crate::core::summary::{Status, Summary};
use crate::db::log::dtlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_downtime_start, insert_error_event};
use crate::errors::AppResult;
use crate::llm::client::HttpModel;
use crate::llm::prompt::PromptTemplate;
use crate::llm::{LanguageModel, ModelError};
use crate::models::downtime::Resolution;
use crate::models::event_kind::EventKind;
use crate::models::message::RawMessage;
use crate::models::record::ExtractedRecord;
use tracing::{debug, error, info, warn};

pub struct Pipeline<M: LanguageModel> {
    model: M,
    template: PromptTemplate,
    max_reply_tokens: u32,
}

impl<M: LanguageModel> Pipeline<M> {
    pub fn new(model: M, template: PromptTemplate, max_reply_tokens: u32) -> Self {
        Self {
            model,
            template,
            max_reply_tokens,
        }
    }

    /// Ask the model to classify `text` and parse its reply.
    pub fn extract(&self, text: &str) -> Result<ExtractedRecord, ModelError> {
        let prompt = self.template.render(text);
        let reply = self.model.complete(&prompt, self.max_reply_tokens)?;
        debug!(reply = %reply, "model reply");
        Ok(parser::parse(&reply))
    }

    /// Process one message end to end.
    ///
    /// Never fails: model and store errors are logged and reported in the
    /// returned summary's status instead.
    pub fn process(&self, pool: &mut DbPool, message: &RawMessage) -> Summary {
        let record = match self.extract(&message.text) {
            Ok(record) => record,
            Err(e) => {
                warn!(author = %message.author, error = %e, "model call failed");
                return Summary::model_unavailable(message, e.to_string());
            }
        };

        match Self::dispatch(pool, &record, message) {
            Ok(resolution) => {
                let status = if record.kind.is_known() {
                    Status::Recorded
                } else {
                    Status::Ignored
                };
                Summary::from_record(&record, message, resolution, status)
            }
            Err(e) => {
                error!(
                    kind = record.kind.to_log_str(),
                    workshop = %record.workshop,
                    unit = %record.unit,
                    error = %e,
                    "failed to store event"
                );
                Summary::from_record(&record, message, None, Status::StoreFailed(e.to_string()))
            }
        }
    }

    /// Apply the record to the store.
    fn dispatch(
        pool: &mut DbPool,
        record: &ExtractedRecord,
        message: &RawMessage,
    ) -> AppResult<Option<Resolution>> {
        let target = format!("{}/{}", record.workshop, record.unit);

        match record.kind {
            EventKind::ErrorReport => {
                let info = record.info.as_deref().unwrap_or_default();
                insert_error_event(
                    &pool.conn,
                    &record.workshop,
                    &record.unit,
                    &message.timestamp,
                    info,
                    &message.author,
                )?;
                info!(key = %target, author = %message.author, "error report stored");
                dtlog_quiet(&pool.conn, "error_report", &target, info);
                Ok(None)
            }
            EventKind::DowntimeStart => {
                insert_downtime_start(
                    &pool.conn,
                    &record.workshop,
                    &record.unit,
                    &message.timestamp,
                )?;
                info!(key = %target, "downtime opened");
                dtlog_quiet(
                    &pool.conn,
                    "downtime_start",
                    &target,
                    &message.timestamp_str(),
                );
                Ok(None)
            }
            EventKind::DowntimeEnd => {
                let resolution = DowntimeResolver::resolve(
                    pool,
                    &record.workshop,
                    &record.unit,
                    &message.timestamp,
                )?;
                Ok(Some(resolution))
            }
            EventKind::Unknown => {
                debug!("unclassified message, nothing stored");
                Ok(None)
            }
        }
    }
}

impl Pipeline<HttpModel> {
    /// Pipeline backed by the HTTP model client described in `cfg`.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let model = HttpModel::from_config(cfg)?;
        let template = PromptTemplate::from_option(cfg.prompt_file.as_deref())?;
        Ok(Self::new(model, template, cfg.max_reply_tokens))
    }
}
