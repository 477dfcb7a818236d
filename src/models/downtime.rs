use std::fmt;

/// Shown instead of an interval when no open start exists for the key.
pub const NOT_FOUND_MARKER: &str = "Не найдено начальное время простоя";

/// Shown in reports for intervals without an end.
pub const STILL_OPEN_MARKER: &str = "Еще не завершен";

/// A row of the `downtimes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DowntimeInterval {
    pub id: i64,
    pub workshop: String,
    pub unit: String,
    pub start_time: String, // "YYYY-MM-DD HH:MM:SS"
    pub end_time: Option<String>,
}

impl DowntimeInterval {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn end_or_marker(&self) -> &str {
        self.end_time.as_deref().unwrap_or(STILL_OPEN_MARKER)
    }
}

/// Outcome of matching a resolution message against the open downtimes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Closed { start: String, end: String },
    NotFound,
}

impl Resolution {
    pub fn is_closed(&self) -> bool {
        matches!(self, Resolution::Closed { .. })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Closed { start, end } => write!(f, "{} - {}", start, end),
            Resolution::NotFound => f.write_str(NOT_FOUND_MARKER),
        }
    }
}
