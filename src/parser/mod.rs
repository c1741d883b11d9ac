pub mod anchor;
pub mod assemble;
pub mod extract;
pub mod html;
pub mod normalize;
pub mod segment;
pub mod table;

use crate::error::ParseError;
use crate::model::{CanonicalEvent, RawFragment, SourceKind};

/// Free-text pipeline: fragments → anchors/groups → fields → events.
pub fn parse_fragments(fragments: &[RawFragment]) -> Vec<CanonicalEvent> {
    let groups = segment::segment_fragments(fragments);
    assemble::assemble_all(&groups, SourceKind::FreeText)
}

/// Live page HTML: every `<body>` child becomes one fragment.
pub fn parse_page(html: &str) -> Result<Vec<CanonicalEvent>, ParseError> {
    let fragments = html::body_fragments(html)?;
    Ok(parse_fragments(&fragments))
}

/// Saved page HTML: rows of the schedule table become events.
pub fn parse_table_document(html: &str) -> Result<Vec<CanonicalEvent>, ParseError> {
    let groups = table::schedule_groups(html)?;
    Ok(assemble::assemble_all(&groups, SourceKind::Table))
}

// ── Tests ──
