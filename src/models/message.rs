use chrono::{Local, NaiveDateTime};

/// Timestamp layout used for every persisted time column.
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Time-of-day layout shown in summaries.
pub const CLOCK_FMT: &str = "%H:%M:%S";

/// An inbound chat message, consumed once by the pipeline.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub text: String,
    pub timestamp: NaiveDateTime, // local wall-clock time of arrival
    pub author: String,
}

impl RawMessage {
    pub fn new(text: impl Into<String>, timestamp: NaiveDateTime, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp,
            author: author.into(),
        }
    }

    /// Message stamped with the current local time.
    pub fn now(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self::new(text, Local::now().naive_local(), author)
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FMT).to_string()
    }

    pub fn clock_str(&self) -> String {
        self.timestamp.format(CLOCK_FMT).to_string()
    }
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FMT).ok()
}
