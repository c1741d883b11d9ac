use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{CanonicalEvent, EventRecord};

/// Any of the event shapes found in the wild: the canonical one, the legacy
/// singular `artist_name`, and the `time` spelling from the table parser.
#[derive(Debug, Deserialize)]
struct StoredEvent {
    date: String,
    #[serde(alias = "time", default)]
    start_time: String,
    #[serde(default)]
    venue_name: String,
    #[serde(default)]
    artist_names: Option<Vec<String>>,
    #[serde(default)]
    artist_name: Option<String>,
}

impl From<StoredEvent> for CanonicalEvent {
    fn from(s: StoredEvent) -> Self {
        let artist_names = match (s.artist_names, s.artist_name) {
            (Some(names), _) => names,
            (None, Some(name)) if !name.trim().is_empty() => vec![name.trim().to_string()],
            _ => Vec::new(),
        };
        CanonicalEvent {
            date: s.date,
            start_time: s.start_time,
            venue_name: s.venue_name,
            artist_names,
        }
    }
}

pub fn write_events(path: &Path, events: &[CanonicalEvent]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(events)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Load an events file, adapting legacy shapes to the canonical one.
pub fn load_events(path: &Path) -> Result<Vec<CanonicalEvent>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_events(&raw).with_context(|| format!("Invalid events file {}", path.display()))
}

pub fn parse_events(json: &str) -> Result<Vec<CanonicalEvent>> {
    let stored: Vec<StoredEvent> = serde_json::from_str(json)?;
    Ok(stored.into_iter().map(CanonicalEvent::from).collect())
}

/// Give each event an id derived from date, time and venue.
///
/// The same listing produces the same ids on every run; collisions get a
/// `-2`, `-3`… suffix in encounter order.
pub fn assign_ids(events: Vec<CanonicalEvent>) -> Vec<EventRecord> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    events
        .into_iter()
        .map(|event| {
            let base = base_id(&event);
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            let id = if *count == 1 {
                base
            } else {
                format!("{}-{}", base, count)
            };
            EventRecord { id, event }
        })
        .collect()
}

pub fn load_records(path: &Path) -> Result<Vec<EventRecord>> {
    Ok(assign_ids(load_events(path)?))
}

fn base_id(event: &CanonicalEvent) -> String {
    let time: String = event.start_time.chars().filter(|c| *c != ':').collect();
    slugify(&format!("{} {} {}", event.date, time, event.venue_name))
}

fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}
