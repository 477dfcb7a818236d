/// Canonical phrases the extraction template asks the model to emit.
pub const PHRASE_START: &str = "Начало простоя";
pub const PHRASE_END: &str = "Устранение простоя";
pub const PHRASE_ERROR: &str = "Появление ошибки";
pub const PHRASE_UNKNOWN: &str = "не определено";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    DowntimeStart,
    DowntimeEnd,
    ErrorReport,
    Unknown,
}

impl EventKind {
    /// Map the value of a `[Тип: …]` tag to a kind.
    ///
    /// The model quotes the phrase inconsistently (`"…"`, `«…»`, `“…”` or
    /// nothing), so the quotes, surrounding whitespace, a trailing period and
    /// letter case are all ignored.
    pub fn from_reply_value(value: &str) -> Self {
        let cleaned = value
            .trim()
            .trim_end_matches('.')
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '«' | '»' | '“' | '”' | '„'))
            .trim()
            .to_lowercase();

        if cleaned == PHRASE_START.to_lowercase() {
            Self::DowntimeStart
        } else if cleaned == PHRASE_END.to_lowercase() {
            Self::DowntimeEnd
        } else if cleaned == PHRASE_ERROR.to_lowercase() {
            Self::ErrorReport
        } else {
            Self::Unknown
        }
    }

    /// Human-readable label used in summaries.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::DowntimeStart => PHRASE_START,
            EventKind::DowntimeEnd => PHRASE_END,
            EventKind::ErrorReport => PHRASE_ERROR,
            EventKind::Unknown => PHRASE_UNKNOWN,
        }
    }

    /// Operation name written to the audit log.
    pub fn to_log_str(&self) -> &'static str {
        match self {
            EventKind::DowntimeStart => "downtime_start",
            EventKind::DowntimeEnd => "downtime_end",
            EventKind::ErrorReport => "error_report",
            EventKind::Unknown => "unknown",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EventKind::ErrorReport)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EventKind::Unknown)
    }
}
