use super::event_kind::EventKind;

/// Placeholder for a field the reply did not provide at all.
pub const FIELD_MISSING: &str = "н/д";

/// Placeholder the template tells the model to use for fields it cannot find.
pub const FIELD_NOT_SPECIFIED: &str = "не указано";

/// Structured result of parsing one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Effective kind, after the info override.
    pub kind: EventKind,
    /// Kind as declared by the `[Тип: …]` tag.
    pub declared_kind: EventKind,
    pub workshop: String,
    pub unit: String,
    /// Only ever `Some` for error reports.
    pub info: Option<String>,
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self {
            kind: EventKind::Unknown,
            declared_kind: EventKind::Unknown,
            workshop: FIELD_MISSING.to_string(),
            unit: FIELD_MISSING.to_string(),
            info: None,
        }
    }
}

impl ExtractedRecord {
    /// True when the declared type was overridden by the presence of info.
    pub fn was_promoted(&self) -> bool {
        self.kind != self.declared_kind
    }
}
