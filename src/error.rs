//! Failures that surface to the user.
//!
//! Lookups that simply find nothing (a cursor outside every header, a line that is not a list
//! item) are not errors; they come back as `None` from the relevant query.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
/// Structurally invalid requests and I/O problems.
pub enum Error {
    /// A grid table could not be reflowed because it has no border line to take widths from.
    #[error("Cannot reflow this table: {0}")]
    Reflow(String),

    /// A roman numeral was requested for a value outside 1..=4999.
    #[error("number out of range (must be 1..4999): {0}")]
    Range(u32),

    /// The configuration file exists but could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading or writing a document or plan failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An edit plan could not be serialised or deserialised.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
