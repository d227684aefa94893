//! HTTP fetching for the presentation page and its slide images
//!
//! Every request goes through one [`reqwest::Client`] built with the configured
//! timeout. Slides are downloaded strictly one after another; the first failure
//! aborts the whole batch.

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::types::{Event, LocalSlideFile, SlideImageRef};
use reqwest::Client;
use std::path::Path;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Sequential downloader for one run
pub struct SlideFetcher {
    client: Client,
    config: FetchConfig,
}

impl SlideFetcher {
    /// Create a fetcher from HTTP settings
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                Error::Io(std::io::Error::other(format!(
                    "Failed to create HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self { client, config })
    }

    /// Download the presentation page as text
    ///
    /// # Errors
    ///
    /// [`Error::PageUnreachable`] on connection failure, timeout, a non-2xx
    /// status or an unreadable body.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let unreachable = |reason: String| Error::PageUnreachable {
            url: url.to_string(),
            reason,
        };

        debug!(url = %url, "fetching presentation page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unreachable(self.describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unreachable(format!("HTTP error {}", status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| unreachable(format!("failed to read response body: {}", e)))?;

        info!(url = %url, bytes = html.len(), "fetched presentation page");
        Ok(html)
    }

    /// Download every slide into `dest_dir`, in order
    ///
    /// Slide `n` is written to `dest_dir/slide-n.jpg`. Progress is reported on
    /// `event_tx` before each download.
    ///
    /// # Errors
    ///
    /// [`Error::SlideDownloadFailed`] for the first slide that cannot be
    /// downloaded or written. Files already written are left in `dest_dir`; the
    /// caller owns the directory and removes it.
    pub async fn fetch_slides(
        &self,
        slides: &[SlideImageRef],
        dest_dir: &Path,
        event_tx: &broadcast::Sender<Event>,
    ) -> Result<Vec<LocalSlideFile>> {
        let total = slides.len();
        let mut downloaded = Vec::with_capacity(total);

        for slide in slides {
            event_tx
                .send(Event::DownloadingSlide {
                    index: slide.index,
                    total,
                })
                .ok();

            downloaded.push(self.fetch_slide(slide, dest_dir).await?);
        }

        info!(count = downloaded.len(), ?dest_dir, "downloaded all slides");
        Ok(downloaded)
    }

    /// Download a single slide into `dest_dir`
    pub async fn fetch_slide(
        &self,
        slide: &SlideImageRef,
        dest_dir: &Path,
    ) -> Result<LocalSlideFile> {
        let failed = |reason: String| Error::SlideDownloadFailed {
            index: slide.index,
            url: slide.remote_url.clone(),
            reason,
        };

        debug!(index = slide.index, url = %slide.remote_url, "downloading slide");

        let response = self
            .client
            .get(&slide.remote_url)
            .send()
            .await
            .map_err(|e| failed(self.describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP error {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| failed(format!("failed to read response body: {}", e)))?;

        let path = dest_dir.join(LocalSlideFile::file_name(slide.index));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| failed(format!("failed to write {}: {}", path.display(), e)))?;

        debug!(index = slide.index, bytes = bytes.len(), ?path, "slide saved");

        Ok(LocalSlideFile {
            index: slide.index,
            path,
        })
    }

    fn describe(&self, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("timed out after {} seconds", self.config.timeout.as_secs())
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            e.to_string()
        }
    }
}
