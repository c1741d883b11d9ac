use anyhow::{bail, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::warn;

use crate::filter::{sort_chronological, start_datetime};
use crate::model::EventRecord;
use crate::settings::Settings;

const PRODID: &str = "-//iCarnatic//Event Calendar//EN";
const TIMEZONE: &str = "Asia/Kolkata";
const UID_DOMAIN: &str = "icarnatic.app";
const TEXT_FOOTER: &str = "✨ Created with iCarnatic Event Calendar";

/// Render events as an iCalendar document (CRLF line endings), together with
/// the number of events written. Events without a readable start are left out.
pub fn to_ics(
    records: &[&EventRecord],
    settings: &Settings,
    now: DateTime<Utc>,
) -> Result<(String, usize)> {
    if records.is_empty() {
        bail!("No events to export");
    }

    let offset = Duration::minutes(settings.utc_offset_minutes as i64);
    let duration = Duration::minutes(settings.event_duration_minutes);
    let calendar = escape_text(&settings.calendar_name);

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODID),
        format!("CALNAME:{}", calendar),
        format!("X-WR-CALNAME:{}", calendar),
        format!("X-WR-TIMEZONE:{}", TIMEZONE),
    ];

    let mut written = 0;
    for record in records {
        let ev = &record.event;
        let Some(local_start) = start_datetime(ev) else {
            warn!("Skipping {}: cannot read '{} {}' as a date and time", record.id, ev.date, ev.start_time);
            continue;
        };
        let start = local_start - offset;
        let end = start + duration;
        let artists = if ev.artist_names.is_empty() {
            "Artists TBA".to_string()
        } else {
            ev.artist_names.join(", ")
        };

        lines.extend([
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}@{}", record.id, UID_DOMAIN),
            format!("DTSTAMP:{}", ics_stamp(now.naive_utc())),
            format!("DTSTART:{}", ics_stamp(start)),
            format!("DTEND:{}", ics_stamp(end)),
            format!("SUMMARY:{}", escape_text(&ev.venue_name)),
            format!("DESCRIPTION:{}", escape_text(&format!("Artists: {}", artists))),
            format!("LOCATION:{}", escape_text(&ev.venue_name)),
            "STATUS:CONFIRMED".to_string(),
            "SEQUENCE:0".to_string(),
            "END:VEVENT".to_string(),
        ]);
        written += 1;
    }

    lines.push("END:VCALENDAR".to_string());
    Ok((lines.join("\r\n"), written))
}

/// Plain-text schedule for messaging apps, grouped by date in calendar order.
pub fn to_text(records: &[&EventRecord], settings: &Settings) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut sorted = records.to_vec();
    sort_chronological(&mut sorted);

    let mut lines = vec![
        format!("🎵 {}", settings.calendar_name),
        format!("📅 {} event{} selected", records.len(), plural(records.len())),
        String::new(),
    ];

    let mut current_date: Option<&str> = None;
    for record in sorted {
        let ev = &record.event;
        if current_date != Some(ev.date.as_str()) {
            if current_date.is_some() {
                lines.push(String::new());
            }
            lines.push(format!("📆 {}", ev.date));
            current_date = Some(ev.date.as_str());
        }
        lines.push(format!("  ⏰ {} - {}", ev.start_time, ev.venue_name));
        if !ev.artist_names.is_empty() {
            lines.push(format!("     🎤 {}", ev.artist_names.join(", ")));
        }
    }
    lines.push(String::new());
    lines.push(TEXT_FOOTER.to_string());

    lines.join("\n")
}

fn ics_stamp(t: NaiveDateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CanonicalEvent;
    use chrono::TimeZone;

    fn record(id: &str, date: &str, time: &str, venue: &str, artists: &[&str]) -> EventRecord {
        EventRecord {
            id: id.into(),
            event: CanonicalEvent {
                date: date.into(),
                start_time: time.into(),
                venue_name: venue.into(),
                artist_names: artists.iter().map(|a| a.to_string()).collect(),
            },
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn ics_converts_local_time_to_utc() {
        let r = record("e1", "25-Dec-2025", "19:00", "Music Hall, Mylapore", &["A", "B"]);
        let (ics, written) = to_ics(&[&r], &Settings::default(), now()).unwrap();
        assert_eq!(written, 1);
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines.first(), Some(&"BEGIN:VCALENDAR"));
        assert_eq!(lines.last(), Some(&"END:VCALENDAR"));
        assert!(lines.contains(&"X-WR-CALNAME:My Carnatic Music Schedule"));
        assert!(lines.contains(&"UID:e1@icarnatic.app"));
        assert!(lines.contains(&"DTSTAMP:20251201T080000Z"));
        assert!(lines.contains(&"DTSTART:20251225T133000Z"));
        assert!(lines.contains(&"DTEND:20251225T143000Z"));
        assert!(lines.contains(&"SUMMARY:Music Hall\\, Mylapore"));
        assert!(lines.contains(&"DESCRIPTION:Artists: A\\, B"));
    }

    #[test]
    fn ics_skips_unparseable_and_says_tba() {
        let bad = record("bad", "25-Dec-2025", "TBA", "X", &[]);
        let good = record("good", "01-Jan-2026", "00:15", "Y", &[]);
        let (ics, written) = to_ics(&[&bad, &good], &Settings::default(), now()).unwrap();
        assert_eq!(written, 1);
        assert!(!ics.contains("UID:bad@"));
        assert!(ics.contains("DESCRIPTION:Artists: Artists TBA"));
        // Just after local midnight is the previous day in UTC.
        assert!(ics.contains("DTSTART:20251231T184500Z"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    }

    #[test]
    fn ics_empty_is_error() {
        assert!(to_ics(&[], &Settings::default(), now()).is_err());
    }

    #[test]
    fn text_grouped_by_date() {
        let a = record("a", "26-Dec-2025", "10:00", "Academy", &["X"]);
        let b = record("b", "25-Dec-2025", "19:00", "Sabha", &["Y", "Z"]);
        let c = record("c", "25-Dec-2025", "09:00", "Hall", &[]);
        let text = to_text(&[&a, &b, &c], &Settings::default());
        let expected = [
            "🎵 My Carnatic Music Schedule",
            "📅 3 events selected",
            "",
            "📆 25-Dec-2025",
            "  ⏰ 09:00 - Hall",
            "  ⏰ 19:00 - Sabha",
            "     🎤 Y, Z",
            "",
            "📆 26-Dec-2025",
            "  ⏰ 10:00 - Academy",
            "     🎤 X",
            "",
            "✨ Created with iCarnatic Event Calendar",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn text_single_and_empty() {
        let a = record("a", "26-Dec-2025", "10:00", "Academy", &[]);
        assert!(to_text(&[&a], &Settings::default()).contains("📅 1 event selected"));
        assert_eq!(to_text(&[], &Settings::default()), "");
    }

    #[test]
    fn escapes_ics_specials() {
        assert_eq!(escape_text("a;b,c\\d\ne"), "a\\;b\\,c\\\\d\\ne");
    }
}
