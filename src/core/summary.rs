//! Supervisor-facing summary of one processed message.

use crate::models::downtime::Resolution;
use crate::models::event_kind::EventKind;
use crate::models::message::RawMessage;
use crate::models::record::{ExtractedRecord, FIELD_MISSING, FIELD_NOT_SPECIFIED};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The store was updated.
    Recorded,
    /// Nothing to store (unclassified message).
    Ignored,
    ModelUnavailable(String),
    StoreFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub kind: EventKind,
    pub workshop: String,
    pub unit: String,
    pub time: String, // HH:MM:SS
    pub info: Option<String>,
    pub resolution: Option<Resolution>,
    pub status: Status,
}

impl Summary {
    pub fn from_record(
        record: &ExtractedRecord,
        message: &RawMessage,
        resolution: Option<Resolution>,
        status: Status,
    ) -> Self {
        Self {
            kind: record.kind,
            workshop: record.workshop.clone(),
            unit: record.unit.clone(),
            time: message.clock_str(),
            info: record.info.clone(),
            resolution,
            status,
        }
    }

    /// Summary for a message the model could not classify at all.
    pub fn model_unavailable(message: &RawMessage, reason: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Unknown,
            workshop: FIELD_MISSING.to_string(),
            unit: FIELD_MISSING.to_string(),
            time: message.clock_str(),
            info: None,
            resolution: None,
            status: Status::ModelUnavailable(reason.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self.status,
            Status::ModelUnavailable(_) | Status::StoreFailed(_)
        )
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Тип: {}]", self.kind.label())?;
        writeln!(f, "[Цех: {}]", self.workshop)?;
        writeln!(f, "[Время: {}]", self.time)?;
        write!(f, "[Агрегат: {}]", self.unit)?;

        if self.kind.is_error() {
            let info = self.info.as_deref().unwrap_or(FIELD_NOT_SPECIFIED);
            write!(f, "\n[Информация: {}]", info)?;
        }

        if let Some(resolution) = &self.resolution {
            write!(f, "\n[Простой: {}]", resolution)?;
        }

        match &self.status {
            Status::ModelUnavailable(_) => write!(f, "\n[Статус: модель недоступна]")?,
            Status::StoreFailed(reason) => write!(f, "\n[Статус: не сохранено: {}]", reason)?,
            Status::Recorded | Status::Ignored => {}
        }

        Ok(())
    }
}
