use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "concerts";
const ENV_PREFIX: &str = "CONCERTS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Listing URL; the page number is appended.
    pub base_url: String,
    /// Directory of saved `*.html` pages for `parse`.
    pub pages_dir: PathBuf,
    /// Events JSON written by `scrape`/`parse` and read by `list`/`export`.
    pub output: PathBuf,
    pub selection_file: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Offset of the listing's local time from UTC, used for ICS timestamps.
    pub utc_offset_minutes: i32,
    pub event_duration_minutes: i64,
    pub calendar_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://icarnatic.org/Season2025.aspx?page=".into(),
            pages_dir: PathBuf::from("pages"),
            output: PathBuf::from("season.json"),
            selection_file: PathBuf::from("my_schedule.json"),
            request_timeout_secs: 30,
            user_agent: concat!("carnatic_scraper/", env!("CARGO_PKG_VERSION")).into(),
            utc_offset_minutes: 330,
            event_duration_minutes: 60,
            calendar_name: "My Carnatic Music Schedule".into(),
        }
    }
}

impl Settings {
    /// Defaults, then `concerts.toml` if present, then `CONCERTS_*` env vars.
    pub fn load() -> Result<Self> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
