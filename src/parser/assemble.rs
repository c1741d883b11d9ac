use super::extract::extract_fields;
use super::normalize::to_24_hour;
use crate::model::{CanonicalEvent, DateTimeAnchor, ExtractedFields, RawGroup, SourceKind};

pub fn assemble(anchor: &DateTimeAnchor, fields: ExtractedFields) -> CanonicalEvent {
    CanonicalEvent {
        date: anchor.date.clone(),
        start_time: to_24_hour(&anchor.time_raw),
        venue_name: fields.venue_name,
        artist_names: fields.artist_names,
    }
}

/// Extract and assemble every group, keeping encounter order.
pub fn assemble_all(groups: &[RawGroup], kind: SourceKind) -> Vec<CanonicalEvent> {
    groups
        .iter()
        .map(|g| assemble(&g.anchor, extract_fields(g, kind)))
        .collect()
}
