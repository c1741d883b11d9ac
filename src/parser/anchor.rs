use std::sync::LazyLock;

use regex::Regex;

use crate::model::DateTimeAnchor;

/// `DD-Mon-YYYY`.
const DATE_PATTERN: &str = r"\d{2}-[A-Za-z]{3}-\d{4}";
const TIME_PATTERN: &str = r"\d{1,2}:\d{2}\s*(?i:AM|PM)";

/// The one anchor pattern: detection and "next group starts here" both use it.
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({DATE_PATTERN})\s+({TIME_PATTERN})\b")).unwrap()
});
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{DATE_PATTERN}$")).unwrap());

/// Recognize a `25-Dec-2025 7:00 PM ...` header at the start of a fragment.
pub fn detect_anchor(text: &str) -> Option<DateTimeAnchor> {
    let caps = ANCHOR_RE.captures(text.trim())?;
    Some(DateTimeAnchor {
        date: caps[1].to_string(),
        time_raw: caps[2].to_string(),
    })
}

/// True when the fragment opens a new group, i.e. the previous one ends here.
pub fn is_anchor(text: &str) -> bool {
    ANCHOR_RE.is_match(text.trim())
}

/// Anchor from a date cell: first line is the date, second the time.
pub fn parse_table_anchor(lines: &[String]) -> Option<DateTimeAnchor> {
    let date = lines.first()?.trim();
    if date.is_empty() {
        return None;
    }
    let time_raw = lines.get(1).map(|t| t.trim()).unwrap_or_default();
    Some(DateTimeAnchor {
        date: date.to_string(),
        time_raw: time_raw.to_string(),
    })
}

/// Whether a date string has the canonical `DD-Mon-YYYY` shape.
pub fn is_canonical_date(date: &str) -> bool {
    DATE_RE.is_match(date)
}
