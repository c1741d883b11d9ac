use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{CanonicalEvent, EventRecord};

/// Case-insensitive substring match over venue, artists, date and time.
pub fn matches_query(record: &EventRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    let ev = &record.event;
    ev.venue_name.to_lowercase().contains(&query)
        || ev.artist_names.join(" ").to_lowercase().contains(&query)
        || ev.date.to_lowercase().contains(&query)
        || ev.start_time.to_lowercase().contains(&query)
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%d-%b-%Y").ok()
}

/// Local start of an event; `None` when date or time never normalized.
pub fn start_datetime(event: &CanonicalEvent) -> Option<NaiveDateTime> {
    let date = parse_date(&event.date)?;
    let time = NaiveTime::parse_from_str(event.start_time.trim(), "%H:%M").ok()?;
    Some(date.and_time(time))
}

/// Stable chronological sort for display and export; unparseable entries go last.
pub fn sort_chronological(records: &mut [&EventRecord]) {
    records.sort_by_key(|r| {
        let date = parse_date(&r.event.date);
        let start = start_datetime(&r.event);
        (date.is_none(), date, start.is_none(), start)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, time: &str, venue: &str, artists: &[&str]) -> EventRecord {
        EventRecord {
            id: format!("{date}-{time}"),
            event: CanonicalEvent {
                date: date.into(),
                start_time: time.into(),
                venue_name: venue.into(),
                artist_names: artists.iter().map(|a| a.to_string()).collect(),
            },
        }
    }

    #[test]
    fn query_matches_any_field() {
        let r = record("25-Dec-2025", "19:00", "Music Academy", &["T. M. Krishna"]);
        assert!(matches_query(&r, "academy"));
        assert!(matches_query(&r, "KRISHNA"));
        assert!(matches_query(&r, "dec-2025"));
        assert!(matches_query(&r, "19:"));
        assert!(matches_query(&r, "   "));
        assert!(!matches_query(&r, "sabha"));
    }

    #[test]
    fn chronological_with_bad_rows_last() {
        let a = record("02-Jan-2026", "09:00", "A", &[]);
        let b = record("25-Dec-2025", "19:00", "B", &[]);
        let c = record("25-Dec-2025", "TBA", "C", &[]);
        let d = record("someday", "10:00", "D", &[]);
        let e = record("25-Dec-2025", "07:30", "E", &[]);
        let mut refs = vec![&a, &b, &c, &d, &e];
        sort_chronological(&mut refs);
        let venues: Vec<_> = refs.iter().map(|r| r.event.venue_name.as_str()).collect();
        assert_eq!(venues, vec!["E", "B", "C", "A", "D"]);
    }

    #[test]
    fn month_abbreviation_any_case() {
        assert_eq!(parse_date("05-jan-2026"), NaiveDate::from_ymd_opt(2026, 1, 5));
        assert!(parse_date("5 January").is_none());
    }
}
