use std::sync::LazyLock;

use regex::Regex;

static TIME_12H_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*([AP]M)$").unwrap());
// One level of nesting: "(Vocal (guest))" goes in one match.
static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\((?:[^()]|\([^()]*\))*?\)").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Convert `H:MM AM|PM` to `HH:MM`. Anything else comes back trimmed but untouched.
pub fn to_24_hour(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(caps) = TIME_12H_RE.captures(trimmed) else {
        return trimmed.to_string();
    };

    let hour: u32 = match caps[1].parse() {
        Ok(h) if (1..=12).contains(&h) => h,
        _ => return trimmed.to_string(),
    };
    let minutes = &caps[2];
    let is_pm = caps[3].eq_ignore_ascii_case("PM");

    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    format!("{:02}:{}", hour, minutes)
}

/// Drop parenthesized annotations: `"Ravi Kumar (Vocal)"` → `"Ravi Kumar"`.
pub fn strip_annotations(text: &str) -> String {
    ANNOTATION_RE.replace_all(text, "").trim().to_string()
}

/// Annotation-strip, then split a comma-separated list of names.
pub fn split_names(text: &str) -> Vec<String> {
    strip_annotations(text)
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Collapse whitespace runs (nbsp included) into single spaces and trim.
pub fn clean_line(text: &str) -> String {
    let text = text.replace('\u{a0}', " ");
    WHITESPACE_RE.replace_all(text.trim(), " ").to_string()
}

/// Split text on line breaks into cleaned, non-empty lines.
pub fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_and_noon() {
        assert_eq!(to_24_hour("12:00 AM"), "00:00");
        assert_eq!(to_24_hour("12:30 PM"), "12:30");
    }

    #[test]
    fn afternoon_and_morning() {
        assert_eq!(to_24_hour("7:05 PM"), "19:05");
        assert_eq!(to_24_hour("9:15 AM"), "09:15");
        assert_eq!(to_24_hour("11:59 pm"), "23:59");
    }

    #[test]
    fn tolerant_spacing() {
        assert_eq!(to_24_hour("  6:30PM "), "18:30");
        assert_eq!(to_24_hour("4:00   am"), "04:00");
    }

    #[test]
    fn garbage_passes_through() {
        assert_eq!(to_24_hour("garbage"), "garbage");
        assert_eq!(to_24_hour("  TBA  "), "TBA");
        assert_eq!(to_24_hour(""), "");
        assert_eq!(to_24_hour("13:00 PM"), "13:00 PM");
    }

    #[test]
    fn strips_annotations() {
        assert_eq!(strip_annotations("Ravi Kumar (Vocal)"), "Ravi Kumar");
        assert_eq!(strip_annotations("No Parens"), "No Parens");
        assert_eq!(strip_annotations("A (x) B (y)"), "A B");
        assert_eq!(strip_annotations("Trio (Violin (guest))"), "Trio");
        assert_eq!(strip_annotations("(Vocal)"), "");
    }

    #[test]
    fn splits_names() {
        assert_eq!(
            split_names("S. Iyer (Vocal), R. Raman (Violin),  , K. Das"),
            vec!["S. Iyer", "R. Raman", "K. Das"]
        );
        assert!(split_names("  ").is_empty());
    }

    #[test]
    fn cleans_whitespace() {
        assert_eq!(clean_line("  Music\u{a0}\u{a0}Hall\t "), "Music Hall");
        assert_eq!(non_empty_lines("a\n\n  \n b "), vec!["a", "b"]);
    }
}
