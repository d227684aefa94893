//! Pipeline driver: page → slide list → downloads → document
//!
//! The driver walks the stages in [`Stage`] order:
//! 1. Fetch the presentation page
//! 2. Extract the slide image list
//! 3. Download every slide into a fresh working area
//! 4. Assemble the document
//! 5. Copy the slides next to the document (optional)
//! 6. Remove the working area
//! 7. Check that the document exists
//!
//! Any failure ends the run. The working area is removed on every path,
//! successful or not, before the error is returned.

use crate::assembly::{DocumentAssembler, ImageMagickAssembler};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extractor::extract_slides;
use crate::fetcher::SlideFetcher;
use crate::types::{Event, OutputArtifact, RunReport, SlideImageRef, Stage};
use crate::utils::copy_dir_all;
use crate::workspace::WorkingArea;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Runs one slide deck from URL to document
pub struct Pipeline {
    config: Config,
    fetcher: SlideFetcher,
    assembler: Arc<dyn DocumentAssembler>,
    event_tx: broadcast::Sender<Event>,
    stage: Stage,
}

impl Pipeline {
    /// Create a pipeline using ImageMagick as selected by `config.assembly.tool`
    pub fn new(config: Config) -> Result<Self> {
        let assembler = Arc::new(ImageMagickAssembler::detect(config.assembly.tool));
        Self::with_assembler(config, assembler)
    }

    /// Create a pipeline with a custom assembler
    pub fn with_assembler(config: Config, assembler: Arc<dyn DocumentAssembler>) -> Result<Self> {
        config.validate()?;
        let fetcher = SlideFetcher::new(config.fetch.clone())?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            config,
            fetcher,
            assembler,
            event_tx,
            stage: Stage::Init,
        })
    }

    /// Subscribe to progress events
    ///
    /// Only events sent after subscribing are received.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Last stage reached
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Configuration driving this pipeline
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute the whole pipeline
    ///
    /// On failure a [`Event::Failed`] is emitted naming the last completed
    /// stage, and the working area has already been removed.
    pub async fn run(&mut self) -> Result<RunReport> {
        info!(
            url = %self.config.page_url,
            output = ?self.config.output.path,
            converter = self.assembler.name(),
            "starting slide pipeline"
        );

        let result = self.execute().await;

        if let Err(e) = &result {
            warn!(stage = %self.stage, error = %e, "slide pipeline failed");
            self.emit(Event::Failed {
                stage: self.stage,
                error: e.to_string(),
            });
        }

        result
    }

    async fn execute(&mut self) -> Result<RunReport> {
        self.prepare_output_dir().await?;

        let page_url = self.config.page_url.clone();
        self.emit(Event::ReadingPage {
            url: page_url.clone(),
        });
        let html = self.fetcher.fetch_page(&page_url).await?;
        self.advance(Stage::PageFetched);

        let slides = extract_slides(&html, &page_url)?;
        self.emit(Event::SlidesFound {
            count: slides.len(),
        });
        self.advance(Stage::ImagesExtracted);

        let working_area = WorkingArea::create(self.config.work_dir.as_deref())?;
        let outcome = self.process_slides(&slides, working_area.path()).await;

        // Remove the working area before reporting anything.
        let cleanup = working_area.close();
        if let Err(e) = &cleanup {
            warn!(error = %e, "working area cleanup failed");
        }
        let (artifact, retained_dir) = outcome?;
        cleanup?;
        self.advance(Stage::CleanedUp);

        if !is_file(&artifact.path).await {
            return Err(Error::OutputMissing {
                path: artifact.path,
            });
        }
        self.advance(Stage::Done);

        info!(output = ?artifact.path, slides = slides.len(), "slide pipeline complete");
        self.emit(Event::Complete {
            path: artifact.path.clone(),
        });

        Ok(RunReport {
            output: artifact,
            slide_count: slides.len(),
            retained_dir,
            converter: self.assembler.name().to_string(),
        })
    }

    /// Download, assemble and optionally retain; everything that touches the
    /// working area
    async fn process_slides(
        &mut self,
        slides: &[SlideImageRef],
        work_dir: &Path,
    ) -> Result<(OutputArtifact, Option<PathBuf>)> {
        let local = self
            .fetcher
            .fetch_slides(slides, work_dir, &self.event_tx)
            .await?;
        self.advance(Stage::SlidesDownloaded);

        self.emit(Event::Converting {
            tool: self.assembler.name().to_string(),
        });
        let artifact = self
            .assembler
            .assemble(&local, &self.config.output.path, self.config.assembly.quality)
            .await?;
        self.advance(Stage::Assembled);

        let retained_dir = if self.config.output.retain_images {
            let dir = self.config.retained_dir();
            self.retain(work_dir, &dir).await?;
            self.advance(Stage::Retained);
            Some(dir)
        } else {
            None
        };

        Ok((artifact, retained_dir))
    }

    /// Copy the working area to `dest`, replacing a previous copy
    async fn retain(&self, work_dir: &Path, dest: &Path) -> Result<()> {
        let failed = |reason: String| Error::RetentionFailed {
            path: dest.to_path_buf(),
            reason,
        };

        if tokio::fs::metadata(dest).await.is_ok() {
            self.emit(Event::ReplacingRetained {
                path: dest.to_path_buf(),
            });
            tokio::fs::remove_dir_all(dest)
                .await
                .map_err(|e| failed(format!("failed to delete old folder: {}", e)))?;
        }

        self.emit(Event::RetainingImages {
            path: dest.to_path_buf(),
        });
        let copied = copy_dir_all(work_dir, dest)
            .await
            .map_err(|e| failed(e.to_string()))?;

        debug!(?dest, copied, "retained slide images");
        Ok(())
    }

    async fn prepare_output_dir(&self) -> Result<()> {
        let dir = self.config.output_dir();
        if dir.as_os_str().is_empty() {
            return Ok(());
        }
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create output directory '{}': {}",
                    dir.display(),
                    e
                ),
            ))
        })
    }

    fn advance(&mut self, stage: Stage) {
        debug!(from = %self.stage, to = %stage, "pipeline stage");
        self.stage = stage;
    }

    fn emit(&self, event: Event) {
        // No subscribers is fine; progress output is optional.
        self.event_tx.send(event).ok();
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
