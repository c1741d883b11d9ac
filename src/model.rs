use serde::{Deserialize, Serialize};

/// One unit of source text: a DOM node's visible text or one table cell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFragment {
    pub text: String,
}

impl RawFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Recognized date+time header, e.g. `25-Dec-2025` / `7:00 PM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeAnchor {
    pub date: String,
    pub time_raw: String,
}

/// Everything that belongs to one anchor, before field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGroup {
    pub anchor: DateTimeAnchor,
    pub lines: Vec<String>,
    /// Bolded venue text of a program cell, whitespace collapsed (table source only).
    pub venue_marker: Option<String>,
}

impl RawGroup {
    pub fn free_text(anchor: DateTimeAnchor, lines: Vec<String>) -> Self {
        Self {
            anchor,
            lines,
            venue_marker: None,
        }
    }
}

/// Which extraction strategy applies to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Live page: anchor line followed by loose text blocks.
    FreeText,
    /// Saved page: two-column "Date & Time" / "Program Details" table.
    Table,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub venue_name: String,
    pub artist_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub date: String,
    pub start_time: String,
    pub venue_name: String,
    pub artist_names: Vec<String>,
}

/// A canonical event plus the identifier assigned when loading a stored list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    #[serde(flatten)]
    pub event: CanonicalEvent,
}
