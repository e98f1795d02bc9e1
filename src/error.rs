//! Crate-wide error type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Recipient or sender number did not reduce to 7-20 digits.
    #[error("invalid fax number {0:?}: use digits only, 7-20 of them (e.g. 2105551234)")]
    InvalidNumber(String),

    /// No sender number configured; the send workflow cannot proceed.
    #[error("sending fax number (ANI) is not set; configure it in settings first")]
    AniNotConfigured,

    /// The PDF the caller asked to fax is not on disk.
    #[error("no PDF to fax at {}; save the document first", .0.display())]
    PdfNotFound(PathBuf),

    /// Transport-level failure (connect, timeout, non-2xx status).
    #[error("WestFax request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered 2xx but the body was not JSON.
    #[error("invalid JSON response from WestFax")]
    MalformedResponse(#[source] reqwest::Error),

    /// The API answered but declared a logical failure.
    #[error("{0}")]
    Api(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to read settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),
}
