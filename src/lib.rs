//! # slidegrab
//!
//! Download the slide images of an online presentation and assemble them into
//! a single PDF.
//!
//! ## Pipeline
//!
//! - **Fetch** the presentation page over HTTP
//! - **Extract** the slide image URLs (`img.slide_image`, highest resolution)
//! - **Download** every slide into a temporary working area
//! - **Assemble** the slides with ImageMagick, in slide order
//! - **Retain** the images next to the document, if asked
//!
//! The working area is removed whether the run succeeds or fails.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slidegrab::{Config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("https://www.slideshare.net/author/my-talk", None)?;
//!     let mut pipeline = Pipeline::new(config)?;
//!
//!     // Subscribe to progress events
//!     let mut events = pipeline.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("{event}");
//!         }
//!     });
//!
//!     let report = pipeline.run().await?;
//!     println!("{} slides in {}", report.slide_count, report.output.path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Document assembly
pub mod assembly;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Slide image extraction from the presentation page
pub mod extractor;
/// HTTP retrieval of the page and slide images
pub mod fetcher;
/// Stage-by-stage pipeline driver
pub mod pipeline;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;
/// Temporary working area
pub mod workspace;

// Re-export commonly used types
pub use assembly::{DocumentAssembler, ImageMagickAssembler};
pub use config::{Config, ConverterTool};
pub use error::{Error, Result, ToExitCode};
pub use pipeline::Pipeline;
pub use types::{Event, LocalSlideFile, OutputArtifact, RunReport, SlideImageRef, Stage};

/// Wait for a termination signal
///
/// - **Unix:** SIGTERM or SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// Racing this against [`Pipeline::run`] and dropping the run on signal
/// removes the working area, since it is deleted when dropped.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // May fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register signal handlers, using ctrl_c fallback");
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C signal");
        }
    }
}

/// Wait for a termination signal
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
            std::future::pending::<()>().await;
        }
    }
}
