use regex::Regex;

use super::normalize::{clean_line, non_empty_lines, split_names, strip_annotations};
use crate::model::{ExtractedFields, RawGroup, SourceKind};

/// Pull venue and artist names out of a group using the strategy for its source.
pub fn extract_fields(group: &RawGroup, kind: SourceKind) -> ExtractedFields {
    match kind {
        SourceKind::FreeText => extract_free_text(group),
        SourceKind::Table => extract_table(group),
    }
}

/// First line is the artist line, last line is the venue.
fn extract_free_text(group: &RawGroup) -> ExtractedFields {
    let (Some(first), Some(last)) = (group.lines.first(), group.lines.last()) else {
        return ExtractedFields::default();
    };

    let artist = strip_annotations(first);
    ExtractedFields {
        venue_name: last.trim().to_string(),
        artist_names: if artist.is_empty() { Vec::new() } else { vec![artist] },
    }
}

/// The bolded line is the venue; everything before it in the cell is artists.
fn extract_table(group: &RawGroup) -> ExtractedFields {
    let venue = group
        .venue_marker
        .as_deref()
        .map(clean_line)
        .unwrap_or_default();

    let text = group.lines.join("\n");
    let artist_block = match find_venue(&text, &venue) {
        Some(idx) => &text[..idx],
        None => text.as_str(),
    };

    let artist_names = non_empty_lines(artist_block)
        .iter()
        .flat_map(|line| split_names(line))
        .filter(|name| venue.is_empty() || !name.contains(&venue))
        .collect();

    ExtractedFields {
        venue_name: venue,
        artist_names,
    }
}

/// Byte offset of the venue in the cell text. Any whitespace run in the venue,
/// including a line break inside the bold tag, matches any whitespace run in the text.
fn find_venue(text: &str, venue: &str) -> Option<usize> {
    if venue.is_empty() {
        return None;
    }
    let pattern = venue
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&pattern).ok()?.find(text).map(|m| m.start())
}
