use thiserror::Error;

/// Failures of the saved-page (table) entry point.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no table with 'Date' / 'Program' headers found")]
    NoScheduleTable,
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
