//! Error handling for the Astra application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for Astra operations.
///
/// Absent optional inputs (install destination, changelog document, missing
/// artifacts) are not errors and never reach this type.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A file required by the pipeline could not be read.
    #[error("Failed to read '{path}': {source}.")]
    ReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A file or directory could not be written.
    #[error("Failed to write '{path}': {source}.")]
    WriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration file not found: '{path}'.")]
    ConfigNotFoundError { path: String },

    #[error("Invalid configuration file '{path}': {message}.")]
    ConfigParseError { path: String, message: String },

    /// The configuration does not satisfy the schema.
    #[error("Invalid config file: {0}.")]
    ConfigValidationError(String),

    /// Represents errors that occur while turning configuration into plans
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A changelog document is present but lacks its required section.
    #[error("Missing required section '{section}' in '{document}'.")]
    MissingSectionError { document: String, section: String },

    #[error("Failed to download '{url}': {source}.")]
    DownloadError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to download '{url}': server responded with {status}.")]
    DownloadStatusError { url: String, status: u16 },

    /// Malformed zip payload, or a failure while writing an archive.
    #[error("Zip error: {0}.")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Directory traversal error: {0}.")]
    WalkDirError(#[from] walkdir::Error),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
