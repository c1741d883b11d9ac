use super::anchor::{detect_anchor, is_anchor};
use super::normalize::clean_line;
use crate::model::{RawFragment, RawGroup};

/// Split a free-text fragment stream into one group per anchor.
///
/// Fragments before the first anchor are ignored. A group runs until the next
/// anchor (date and time), or end of stream; blank fragments are
/// skipped without ending the group. An anchor with no lines still yields a group.
pub fn segment_fragments(fragments: &[RawFragment]) -> Vec<RawGroup> {
    let mut groups = Vec::new();
    let mut i = 0;

    while i < fragments.len() {
        let text = fragments[i].text.trim();
        if text.is_empty() {
            i += 1;
            continue;
        }

        let Some(anchor) = detect_anchor(text) else {
            i += 1;
            continue;
        };

        i += 1;
        let mut lines = Vec::new();
        while i < fragments.len() && !is_anchor(&fragments[i].text) {
            let line = clean_line(&fragments[i].text);
            if !line.is_empty() {
                lines.push(line);
            }
            i += 1;
        }

        groups.push(RawGroup::free_text(anchor, lines));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frags(texts: &[&str]) -> Vec<RawFragment> {
        texts.iter().map(|t| RawFragment::new(*t)).collect()
    }

    #[test]
    fn one_anchor_n_lines() {
        let groups = segment_fragments(&frags(&[
            "25-Dec-2025 7:00 PM",
            "Ravi Kumar (Vocal)",
            "Violin accompaniment",
            "Music Hall",
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lines.len(), 3);
        assert_eq!(groups[0].lines[2], "Music Hall");
    }

    #[test]
    fn blank_fragments_do_not_break_groups() {
        let groups = segment_fragments(&frags(&[
            "",
            "25-Dec-2025 7:00 PM",
            "   ",
            "Artist",
            "\n",
            "Venue",
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lines, vec!["Artist", "Venue"]);
    }

    #[test]
    fn preamble_is_ignored() {
        let groups = segment_fragments(&frags(&["Season 2025", "Page 1", "25-Dec-2025 7:00 PM", "A"]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lines, vec!["A"]);
    }

    #[test]
    fn adjacent_anchors_keep_empty_group() {
        let groups = segment_fragments(&frags(&[
            "25-Dec-2025 7:00 PM",
            "26-Dec-2025 6:00 PM",
            "Artist",
            "Hall",
        ]));
        assert_eq!(groups.len(), 2);
        assert!(groups[0].lines.is_empty());
        assert_eq!(groups[1].anchor.date, "26-Dec-2025");
        assert_eq!(groups[1].lines.len(), 2);
    }

    #[test]
    fn date_only_line_stays_in_group() {
        let groups = segment_fragments(&frags(&[
            "25-Dec-2025 7:00 PM",
            "Ravi Kumar",
            "27-Dec-2025 (postponed from 20-Dec)",
            "Music Hall",
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].lines,
            vec!["Ravi Kumar", "27-Dec-2025 (postponed from 20-Dec)", "Music Hall"]
        );
    }

    #[test]
    fn no_anchors_no_groups() {
        assert!(segment_fragments(&frags(&["nothing", "to see"])).is_empty());
        assert!(segment_fragments(&[]).is_empty());
    }
}
