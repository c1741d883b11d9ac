use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::model::EventRecord;

/// The personal "my schedule" list: selected event ids, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    /// Missing file means nothing selected yet; a corrupt one is reported and ignored.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!("Failed to read selection {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => {
                let mut sel = Self::default();
                for id in ids {
                    sel.add(&id);
                }
                sel
            }
            Err(e) => {
                warn!("Ignoring malformed selection {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.ids)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Returns false when the id was already selected.
    pub fn add(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer match any event; returns what was removed.
    pub fn prune_stale(&mut self, records: &[EventRecord]) -> Vec<String> {
        let known: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        let (keep, stale): (Vec<String>, Vec<String>) = std::mem::take(&mut self.ids)
            .into_iter()
            .partition(|id| known.contains(id.as_str()));
        self.ids = keep;
        stale
    }

    /// Selected records, in event-list order.
    pub fn selected<'a>(&self, records: &'a [EventRecord]) -> Vec<&'a EventRecord> {
        let wanted: HashSet<&str> = self.ids.iter().map(String::as_str).collect();
        records.iter().filter(|r| wanted.contains(r.id.as_str())).collect()
    }
}
