use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::error::ParseError;
use crate::model::CanonicalEvent;
use crate::parser;

/// Per-run tally of the saved-page directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseStats {
    pub files: usize,
    pub ok: usize,
    pub without_table: usize,
    pub errors: usize,
}

/// Saved `*.html` files of `dir`, sorted by file name.
pub fn html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "html"))
        .collect();
    files.sort();
    Ok(files)
}

pub fn parse_file(path: &Path) -> Result<Vec<CanonicalEvent>, ParseError> {
    let html = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parser::parse_table_document(&html)
}

/// Parse every saved page in order. A file that fails contributes nothing.
pub fn parse_directory(dir: &Path) -> Result<(Vec<CanonicalEvent>, ParseStats)> {
    let files = html_files(dir)?;
    let mut stats = ParseStats {
        files: files.len(),
        ..ParseStats::default()
    };

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} files")?
            .progress_chars("=> "),
    );

    let mut events = Vec::new();
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match parse_file(path) {
            Ok(parsed) => {
                info!("{}: {} events", name, parsed.len());
                stats.ok += 1;
                events.extend(parsed);
            }
            Err(ParseError::NoScheduleTable) => {
                warn!("No matching table found in {}", name);
                stats.without_table += 1;
            }
            Err(e) => {
                error!("Error parsing {}: {}", name, e);
                stats.errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok((events, stats))
}
