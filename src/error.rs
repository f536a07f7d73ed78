use thiserror::Error;

/// Convenience result type for snd operations.
pub type SndResult<T> = Result<T, SndError>;

/// Error type returned by readers, transforms and the streaming driver.
///
/// A single enum shared by every command so the binary can classify failures uniformly.
#[derive(Debug, Error)]
pub enum SndError {
    /// Underlying I/O error (e.g. file not found, broken pipe).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the tab-separated record reader (e.g. invalid UTF-8).
    #[error("read error: {0}")]
    Csv(#[from] csv::Error),

    /// A numeric field of a data row could not be parsed.
    #[error("failed to parse value at line {line} column {column}: {message} (raw='{raw}')")]
    ParseError {
        line: u64,
        column: usize,
        raw: String,
        message: String,
    },

    /// A command option is out of range or otherwise unusable.
    #[error("invalid option: {message}")]
    InvalidOption { message: String },
}
