mod error;
mod export;
mod filter;
mod live;
mod model;
mod offline;
mod parser;
mod schedule;
mod settings;
mod store;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use model::EventRecord;
use schedule::Selection;
use settings::Settings;

#[derive(Parser)]
#[command(name = "carnatic_scraper", about = "Concert season scraper and schedule exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape listing pages from the live site
    Scrape {
        /// First page to fetch
        #[arg(long, default_value_t = 1)]
        start: u32,
        /// Last page to fetch (inclusive)
        #[arg(long, default_value_t = 57)]
        end: u32,
        /// Events JSON to write (default: settings `output`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse saved HTML pages from a directory
    Parse {
        /// Directory of *.html files (default: settings `pages_dir`)
        #[arg(short, long)]
        dir: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List events, optionally filtered
    List {
        /// Events JSON to read (default: settings `output`)
        #[arg(short, long)]
        events: Option<PathBuf>,
        /// Case-insensitive search over venue, artists, date and time
        #[arg(short, long)]
        query: Option<String>,
        /// Only events in my schedule
        #[arg(long)]
        mine: bool,
    },
    /// Export my schedule (or all events) as ICS or text
    Export {
        #[arg(short, long)]
        events: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Ics)]
        format: ExportFormat,
        /// Export every event instead of my schedule
        #[arg(long)]
        all: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage my schedule
    Select {
        #[command(subcommand)]
        action: SelectAction,
        #[arg(short, long, global = true)]
        events: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SelectAction {
    /// Add event ids
    Add { ids: Vec<String> },
    /// Remove event ids
    Remove { ids: Vec<String> },
    /// Remove everything
    Clear,
    /// Remove ids that no longer match any event
    Prune,
    /// Print selected ids
    Show,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Ics,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Scrape { start, end, output } => {
            let output = output.unwrap_or_else(|| settings.output.clone());
            println!("Scraping pages {}..={} from {}", start, end, settings.base_url);
            let events = live::scrape_pages(&settings, start, end).await?;
            store::write_events(&output, &events)?;
            println!("Saved {} events to {}", events.len(), output.display());
            Ok(())
        }
        Commands::Parse { dir, output } => {
            let dir = dir.unwrap_or_else(|| settings.pages_dir.clone());
            let output = output.unwrap_or_else(|| settings.output.clone());
            let (events, stats) = offline::parse_directory(&dir)?;
            if stats.files == 0 {
                println!("No .html files in {}.", dir.display());
            }
            store::write_events(&output, &events)?;
            println!(
                "Parsed {} entries from {} files ({} ok, {} without table, {} errors). Output written to {}",
                events.len(),
                stats.files,
                stats.ok,
                stats.without_table,
                stats.errors,
                output.display()
            );
            Ok(())
        }
        Commands::List { events, query, mine } => {
            let records = load_records(&settings, events)?;
            let selection = Selection::load(&settings.selection_file);
            let mut shown: Vec<&EventRecord> = records
                .iter()
                .filter(|r| !mine || selection.contains(&r.id))
                .filter(|r| filter::matches_query(r, query.as_deref().unwrap_or("")))
                .collect();
            filter::sort_chronological(&mut shown);

            if shown.is_empty() {
                println!("No events found.");
                return Ok(());
            }
            println!(
                "{:1} | {:<11} | {:<5} | {:<28} | {:<36} | {}",
                "*", "Date", "Time", "Venue", "Artists", "Id"
            );
            println!("{}", "-".repeat(120));
            for r in &shown {
                let star = if selection.contains(&r.id) { "*" } else { " " };
                println!(
                    "{:1} | {:<11} | {:<5} | {:<28} | {:<36} | {}",
                    star,
                    r.event.date,
                    r.event.start_time,
                    truncate(&r.event.venue_name, 28),
                    truncate(&r.event.artist_names.join(", "), 36),
                    r.id
                );
            }
            println!("\n{} events | add to my schedule with: select add <id>", shown.len());
            Ok(())
        }
        Commands::Export { events, format, all, output } => {
            let records = load_records(&settings, events)?;
            let selection = Selection::load(&settings.selection_file);
            let chosen: Vec<&EventRecord> = if all {
                records.iter().collect()
            } else {
                if selection.is_empty() {
                    println!("My schedule is empty. Use 'select add <id>' or pass --all.");
                    return Ok(());
                }
                selection.selected(&records)
            };
            let (rendered, written) = match format {
                ExportFormat::Ics => export::to_ics(&chosen, &settings, chrono::Utc::now())?,
                ExportFormat::Text => (export::to_text(&chosen, &settings), chosen.len()),
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported {} events to {}", written, path.display());
                }
                None => println!("{}", rendered),
            }
            Ok(())
        }
        Commands::Select { action, events } => {
            let path = settings.selection_file.clone();
            let mut selection = Selection::load(&path);
            match action {
                SelectAction::Add { ids } => {
                    let records = load_records(&settings, events)?;
                    for id in ids {
                        if !records.iter().any(|r| r.id == id) {
                            println!("Unknown event id: {}", id);
                        } else if !selection.add(&id) {
                            println!("Already selected: {}", id);
                        }
                    }
                }
                SelectAction::Remove { ids } => {
                    for id in ids {
                        if !selection.remove(&id) {
                            println!("Not selected: {}", id);
                        }
                    }
                }
                SelectAction::Clear => selection.clear(),
                SelectAction::Show => {
                    for id in selection.ids() {
                        println!("{}", id);
                    }
                }
                SelectAction::Prune => {
                    let records = load_records(&settings, events)?;
                    let stale = selection.prune_stale(&records);
                    println!("Removed {} unavailable event(s)", stale.len());
                }
            }
            selection.save(&path)?;
            println!("{} events in my schedule", selection.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_elapsed(elapsed));
    }

    result
}

fn load_records(settings: &Settings, events: Option<PathBuf>) -> anyhow::Result<Vec<EventRecord>> {
    let path = events.unwrap_or_else(|| settings.output.clone());
    store::load_records(&path)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Wall-clock summary: `4.2s`, `3m 07s`, `1h 02m 09s`.
fn format_elapsed(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    match (secs / 3600, secs % 3600 / 60, secs % 60) {
        (0, 0, _) => format!("{:.1}s", d.as_secs_f64()),
        (0, m, s) => format!("{}m {:02}s", m, s),
        (h, m, s) => format!("{}h {:02}m {:02}s", h, m, s),
    }
}
