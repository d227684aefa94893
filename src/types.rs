//! Core types for slidegrab

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A slide image referenced by the presentation page
///
/// Created by the extractor in page order and consumed once by the fetcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideImageRef {
    /// 1-based position in the presentation
    pub index: u32,
    /// Absolute URL of the image at the chosen resolution
    pub remote_url: String,
}

/// A slide image downloaded into the working area
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSlideFile {
    /// 1-based position in the presentation
    pub index: u32,
    /// Location of the downloaded image
    pub path: PathBuf,
}

impl LocalSlideFile {
    /// File name used for the slide with the given index
    ///
    /// ```
    /// use slidegrab::types::LocalSlideFile;
    ///
    /// assert_eq!(LocalSlideFile::file_name(3), "slide-3.jpg");
    /// ```
    #[must_use]
    pub fn file_name(index: u32) -> String {
        format!("slide-{index}.jpg")
    }
}

/// Output document format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Portable Document Format
    #[default]
    Pdf,
}

impl DocumentFormat {
    /// File extension including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => ".pdf",
        }
    }
}

/// The assembled document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputArtifact {
    /// Location of the document
    pub path: PathBuf,
    /// Format of the document
    pub format: DocumentFormat,
}

/// Pipeline stage
///
/// Stages are reached in declaration order; `Retained` is skipped when image
/// retention was not requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing has happened yet
    Init,
    /// The presentation page was downloaded
    PageFetched,
    /// Slide image URLs were extracted from the page
    ImagesExtracted,
    /// Every slide image is in the working area
    SlidesDownloaded,
    /// The converter produced the output document
    Assembled,
    /// Downloaded images were copied next to the document
    Retained,
    /// The working area was removed
    CleanedUp,
    /// The output document was verified on disk
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::PageFetched => "page_fetched",
            Stage::ImagesExtracted => "images_extracted",
            Stage::SlidesDownloaded => "slides_downloaded",
            Stage::Assembled => "assembled",
            Stage::Retained => "retained",
            Stage::CleanedUp => "cleaned_up",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Progress event emitted by the pipeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The presentation page is being requested
    ReadingPage {
        /// Page URL
        url: String,
    },
    /// Slide images were found on the page
    SlidesFound {
        /// Number of slides
        count: usize,
    },
    /// A slide image is being downloaded
    DownloadingSlide {
        /// 1-based slide index
        index: u32,
        /// Total number of slides
        total: usize,
    },
    /// The converter is being run
    Converting {
        /// Converter command name
        tool: String,
    },
    /// A previously retained image folder is being deleted
    ReplacingRetained {
        /// The folder being replaced
        path: PathBuf,
    },
    /// Downloaded images are being copied next to the document
    RetainingImages {
        /// Destination folder
        path: PathBuf,
    },
    /// The run finished successfully
    Complete {
        /// Location of the document
        path: PathBuf,
    },
    /// The run failed
    Failed {
        /// Last stage that completed before the failure
        stage: Stage,
        /// Error message
        error: String,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ReadingPage { url } => write!(f, "Reading slide page {url}..."),
            Event::SlidesFound { count } => write!(f, "Found {count} slides"),
            Event::DownloadingSlide { index, total } => {
                write!(f, "Downloading slide {index} of {total}...")
            }
            Event::Converting { tool } => write!(f, "Converting to PDF with '{tool}'..."),
            Event::ReplacingRetained { path } => {
                write!(f, "Delete old folder {}", path.display())
            }
            Event::RetainingImages { path } => {
                write!(f, "Create new folder and copy files to {}", path.display())
            }
            Event::Complete { path } => write!(
                f,
                "Your file has been successfully created at {}",
                path.display()
            ),
            Event::Failed { stage, error } => write!(f, "Failed after {stage}: {error}"),
        }
    }
}

/// Summary of a successful run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// The assembled document
    pub output: OutputArtifact,
    /// Number of slides in the document
    pub slide_count: usize,
    /// Folder holding the retained images, if retention was requested
    pub retained_dir: Option<PathBuf>,
    /// Converter command that produced the document
    pub converter: String,
}
