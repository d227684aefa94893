//! Document assembly from downloaded slide images
//!
//! The core abstraction is the [`DocumentAssembler`] trait. The production
//! implementation, [`ImageMagickAssembler`], shells out (without a shell) to
//! ImageMagick's `magick` or legacy `convert` command.
//!
//! Slides are always handed to the converter in presentation order. Ordering
//! uses the numeric slide index, so `slide-10.jpg` follows `slide-9.jpg`
//! rather than `slide-1.jpg`.

mod cli;
mod traits;

pub use cli::{CONVERT, ImageMagickAssembler, MAGICK};
pub use traits::DocumentAssembler;

use crate::types::LocalSlideFile;
use std::path::Path;

/// Slide paths sorted by slide index
///
/// # Examples
///
/// ```
/// use slidegrab::assembly::ordered_paths;
/// use slidegrab::types::LocalSlideFile;
/// use std::path::{Path, PathBuf};
///
/// let slides = vec![
///     LocalSlideFile { index: 10, path: PathBuf::from("slide-10.jpg") },
///     LocalSlideFile { index: 2, path: PathBuf::from("slide-2.jpg") },
/// ];
/// assert_eq!(
///     ordered_paths(&slides),
///     vec![Path::new("slide-2.jpg"), Path::new("slide-10.jpg")]
/// );
/// ```
#[must_use]
pub fn ordered_paths(slides: &[LocalSlideFile]) -> Vec<&Path> {
    let mut ordered: Vec<&LocalSlideFile> = slides.iter().collect();
    ordered.sort_by_key(|slide| slide.index);
    ordered.into_iter().map(|slide| slide.path.as_path()).collect()
}
