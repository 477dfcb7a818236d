//! Reply parser: turns the model's bracketed-tag reply into an
//! [`ExtractedRecord`].
//!
//! The reply is scanned line by line by a two-state machine:
//!
//! * `Fields`: only tagged lines matter, anything else is chatter and
//!   is ignored.
//! * `Info`: entered on the first `[Информация: …]` line. From then on every
//!   untagged, non-blank line is a continuation of the description. Tagged
//!   lines are still recognised in this state.
//!
//! A malformed tagged line is reported, skipped, and parsing goes on.

use crate::models::event_kind::EventKind;
use crate::models::record::{ExtractedRecord, FIELD_MISSING, FIELD_NOT_SPECIFIED};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

static TAG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\s*(Тип|Цех|Агрегат|Информация)\b\s*(:)?(.*)$").expect("valid tag regex")
});

/// Separator the template puts between a tag and its value.
const VALUE_SEP: &str = ": ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Kind,
    Workshop,
    Unit,
    Info,
}

impl Tag {
    fn from_keyword(kw: &str) -> Option<Self> {
        match kw {
            "Тип" => Some(Tag::Kind),
            "Цех" => Some(Tag::Workshop),
            "Агрегат" => Some(Tag::Unit),
            "Информация" => Some(Tag::Info),
            _ => None,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            Tag::Kind => "Тип",
            Tag::Workshop => "Цех",
            Tag::Unit => "Агрегат",
            Tag::Info => "Информация",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: [{tag}] is not followed by ':' ({text})")]
    MissingSeparator {
        line: usize,
        tag: &'static str,
        text: String,
    },

    #[error("line {line}: [{tag}] has an empty value")]
    EmptyValue { line: usize, tag: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Fields,
    Info,
}

/// Classified reply line.
enum Line<'a> {
    Tagged(Tag, &'a str),
    Plain(&'a str),
}

fn classify(line: &str, line_no: usize) -> Result<Line<'_>, ParseError> {
    let Some(caps) = TAG_LINE.captures(line) else {
        return Ok(Line::Plain(line));
    };
    let Some(tag) = caps.get(1).and_then(|m| Tag::from_keyword(m.as_str())) else {
        return Ok(Line::Plain(line));
    };

    if caps.get(2).is_none() {
        return Err(ParseError::MissingSeparator {
            line: line_no,
            tag: tag.keyword(),
            text: line.to_string(),
        });
    }

    let rest = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    Ok(Line::Tagged(tag, rest))
}

fn strip_closing(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == ']')
}

/// Value of a single-valued tag: the first separator-delimited segment.
fn scalar_value(rest: &str) -> &str {
    let first = rest.split(VALUE_SEP).next().unwrap_or(rest);
    strip_closing(first)
}

/// Extract and clean the value of a tagged line.
fn tag_value(tag: Tag, rest: &str, line_no: usize) -> Result<String, ParseError> {
    let value = match tag {
        // Description keeps everything after the first colon.
        Tag::Info => strip_closing(rest).to_string(),
        Tag::Kind => scalar_value(rest).to_string(),
        Tag::Workshop | Tag::Unit => scalar_value(rest).replace('"', "").trim().to_string(),
    };

    if value.is_empty() {
        return Err(ParseError::EmptyValue {
            line: line_no,
            tag: tag.keyword(),
        });
    }
    Ok(value)
}

fn skip(skipped: &mut Vec<ParseError>, e: ParseError) {
    warn!(error = %e, "skipping malformed reply line");
    skipped.push(e);
}

/// Collected fields, before the info override is applied.
#[derive(Debug, Default)]
struct RecordBuilder {
    kind: Option<EventKind>,
    workshop: Option<String>,
    unit: Option<String>,
    info: Vec<String>,
}

impl RecordBuilder {
    fn set(&mut self, tag: Tag, value: String) {
        match tag {
            Tag::Kind => self.kind = Some(EventKind::from_reply_value(&value)),
            Tag::Workshop => self.workshop = Some(value),
            Tag::Unit => self.unit = Some(value),
            Tag::Info => self.info.push(value),
        }
    }

    fn build(self) -> ExtractedRecord {
        let declared = self.kind.unwrap_or(EventKind::Unknown);

        let info = if self.info.is_empty() {
            None
        } else {
            Some(self.info.join(" ").trim().to_string())
                .filter(|s| !s.is_empty() && s.to_lowercase() != FIELD_NOT_SPECIFIED)
        };

        // The template's "не указано" sentinel counts as no description.
        // A real description only makes sense for an error report; its
        // presence wins over the declared type.
        let kind = if info.is_some() && declared != EventKind::ErrorReport {
            warn!(
                declared = declared.label(),
                "reply carries [Информация]; treating it as an error report"
            );
            EventKind::ErrorReport
        } else {
            declared
        };

        ExtractedRecord {
            kind,
            declared_kind: declared,
            workshop: self.workshop.unwrap_or_else(|| FIELD_MISSING.to_string()),
            unit: self.unit.unwrap_or_else(|| FIELD_MISSING.to_string()),
            info,
        }
    }
}

/// Parsed record plus the lines that had to be skipped.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub record: ExtractedRecord,
    pub skipped: Vec<ParseError>,
}

pub fn parse_with_diagnostics(reply: &str) -> ParseOutcome {
    let mut builder = RecordBuilder::default();
    let mut mode = Mode::Fields;
    let mut skipped = Vec::new();

    for (idx, raw) in reply.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let classified = match classify(line, line_no) {
            Ok(c) => c,
            Err(e) => {
                skip(&mut skipped, e);
                continue;
            }
        };

        match (classified, mode) {
            (Line::Tagged(tag, rest), _) => match tag_value(tag, rest, line_no) {
                Ok(value) => {
                    if tag == Tag::Info {
                        mode = Mode::Info;
                    }
                    builder.set(tag, value);
                }
                Err(e) => skip(&mut skipped, e),
            },
            (Line::Plain(text), Mode::Info) => {
                let part = text.trim_matches(|c: char| c.is_whitespace() || c == '[' || c == ']');
                if !part.is_empty() {
                    builder.info.push(part.to_string());
                }
            }
            (Line::Plain(text), Mode::Fields) => {
                debug!(line = line_no, text, "ignoring untagged reply line");
            }
        }
    }

    ParseOutcome {
        record: builder.build(),
        skipped,
    }
}

/// Parse a model reply, logging and dropping malformed lines.
pub fn parse(reply: &str) -> ExtractedRecord {
    parse_with_diagnostics(reply).record
}
