use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::model::CanonicalEvent;
use crate::parser;
use crate::settings::Settings;

/// HTTP session owned by one scrape run; dropped when the run ends either way.
pub struct LiveSession {
    client: reqwest::Client,
    base_url: String,
}

impl LiveSession {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn page_url(&self, page: u32) -> String {
        format!("{}{}", self.base_url, page)
    }

    /// Fetch one listing page. Any transport or HTTP status error is returned as-is.
    pub async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page);
        let start = Instant::now();
        let html = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to load {}", url))?
            .error_for_status()
            .with_context(|| format!("Bad response from {}", url))?
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        debug!("Fetched {} ({} bytes) in {}ms", url, html.len(), start.elapsed().as_millis());
        Ok(html)
    }
}

/// Scrape pages `start..=end` one after another and collect their events.
///
/// A failed page aborts the whole run.
pub async fn scrape_pages(settings: &Settings, start: u32, end: u32) -> Result<Vec<CanonicalEvent>> {
    if start > end {
        bail!("Start page {} is after end page {}", start, end);
    }

    let session = LiveSession::new(settings)?;
    let pb = ProgressBar::new(u64::from(end - start + 1));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg} ({eta})")?
            .progress_chars("=> "),
    );

    let mut events = Vec::new();
    for page in start..=end {
        pb.set_message(format!("page {}", page));
        let html = match session.fetch_page(page).await {
            Ok(html) => html,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };
        let page_events = parser::parse_page(&html)
            .with_context(|| format!("Failed to parse page {}", page))?;
        info!("Page {}: {} events", page, page_events.len());
        events.extend(page_events);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Scraped {} pages, {} events", end - start + 1, events.len());
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_appends_number() {
        let settings = Settings {
            base_url: "https://example.org/Season.aspx?page=".into(),
            ..Settings::default()
        };
        let session = LiveSession::new(&settings).unwrap();
        assert_eq!(session.page_url(7), "https://example.org/Season.aspx?page=7");
    }

    #[tokio::test]
    async fn reversed_range_is_rejected() {
        let err = scrape_pages(&Settings::default(), 5, 2).await.unwrap_err();
        assert!(err.to_string().contains("after end page"));
    }
}
