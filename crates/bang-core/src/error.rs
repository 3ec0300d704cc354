//! Error types for bang-core

use crate::table::RowId;
use crate::validator::ImportRejection;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bang-core
#[derive(Debug, Error)]
pub enum Error {
    /// An import file failed validation
    #[error("invalid import file: {0}")]
    InvalidImportFile(#[from] ImportRejection),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persistence gateway could not serve a request
    #[error("storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    /// The defaults resource could not be fetched or parsed
    #[error("failed to load defaults from '{location}': {message}")]
    Defaults { location: String, message: String },

    /// No row with this ID exists in the table
    #[error("row {0} not found")]
    RowNotFound(RowId),

    /// No action is bound to this control
    #[error("no action bound to control '{0}'")]
    UnknownControl(String),

    /// CSV error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
