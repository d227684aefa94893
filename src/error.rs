//! Error types for slidegrab
//!
//! Every pipeline stage has its own error variant carrying enough context
//! (page URL, slide index, file path) to diagnose a failed run without
//! re-running it. [`ToExitCode`] maps each variant to a process exit code and a
//! machine-readable error code for the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for slidegrab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for slidegrab
///
/// Each stage of the pipeline fails with exactly one of these variants. All of
/// them are fatal to the run.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or command-line input
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "output")
        key: Option<String>,
    },

    /// The presentation page could not be fetched
    #[error("could not download {url}: {reason}")]
    PageUnreachable {
        /// The page URL that was requested
        url: String,
        /// Why the request failed (timeout, connection, HTTP status)
        reason: String,
    },

    /// The page did not expose any usable slide images
    #[error("could not find slides on {url}: {reason}")]
    NoSlidesFound {
        /// The page URL that was parsed
        url: String,
        /// What was missing from the markup
        reason: String,
    },

    /// A single slide image could not be downloaded
    #[error("could not download slide-{index} from {url}: {reason}")]
    SlideDownloadFailed {
        /// 1-based index of the slide that failed
        index: u32,
        /// Remote URL of the slide image
        url: String,
        /// Why the download failed
        reason: String,
    },

    /// The external converter failed to produce the output document
    #[error("could not convert slides to {output}: {reason}")]
    AssemblyFailed {
        /// Destination path of the document
        output: PathBuf,
        /// Why the conversion failed (spawn error, exit status, stderr)
        reason: String,
    },

    /// Downloaded images could not be copied next to the output document
    #[error("could not copy intermediate images to {path}: {reason}")]
    RetentionFailed {
        /// The retention directory
        path: PathBuf,
        /// Why the copy failed
        reason: String,
    },

    /// Every stage reported success but the document is not on disk
    #[error("output file could not be created at {path}")]
    OutputMissing {
        /// Where the document was expected
        path: PathBuf,
    },

    /// I/O error outside of a specific stage (output directory, working area)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a configuration error for a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Convert errors into process exit codes for the CLI
///
/// Each failure kind gets its own non-zero code so wrapper scripts can tell a
/// dead link from a missing converter.
pub trait ToExitCode {
    /// Get the process exit code for this error
    fn exit_code(&self) -> u8;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToExitCode for Error {
    fn exit_code(&self) -> u8 {
        match self {
            Error::Io(_) => 1,
            Error::Config { .. } => 2,
            Error::PageUnreachable { .. } => 3,
            Error::NoSlidesFound { .. } => 4,
            Error::SlideDownloadFailed { .. } => 5,
            Error::AssemblyFailed { .. } => 6,
            Error::RetentionFailed { .. } => 7,
            Error::OutputMissing { .. } => 8,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Io(_) => "io_error",
            Error::Config { .. } => "config_error",
            Error::PageUnreachable { .. } => "page_unreachable",
            Error::NoSlidesFound { .. } => "no_slides_found",
            Error::SlideDownloadFailed { .. } => "slide_download_failed",
            Error::AssemblyFailed { .. } => "assembly_failed",
            Error::RetentionFailed { .. } => "retention_failed",
            Error::OutputMissing { .. } => "output_missing",
        }
    }
}
