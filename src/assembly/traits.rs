//! Trait for turning downloaded slides into one document

use crate::types::{LocalSlideFile, OutputArtifact};
use async_trait::async_trait;
use std::path::Path;

/// Trait for document assembly
///
/// Implementations receive the slides in any order and are responsible for
/// laying them out in presentation order (see
/// [`ordered_paths`](super::ordered_paths)).
///
/// # Examples
///
/// ```no_run
/// use slidegrab::assembly::{DocumentAssembler, ImageMagickAssembler};
/// use slidegrab::config::ConverterTool;
/// use slidegrab::types::LocalSlideFile;
/// use std::path::{Path, PathBuf};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let assembler = ImageMagickAssembler::detect(ConverterTool::Auto);
/// let slides = vec![LocalSlideFile { index: 1, path: PathBuf::from("slide-1.jpg") }];
/// let artifact = assembler.assemble(&slides, Path::new("deck.pdf"), 100).await?;
/// println!("wrote {}", artifact.path.display());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait DocumentAssembler: Send + Sync {
    /// Combine `slides` into a document at `output`
    ///
    /// # Arguments
    ///
    /// * `slides` - Downloaded slide images, in any order
    /// * `output` - Destination path of the document
    /// * `quality` - Converter quality, 1-100
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssemblyFailed`](crate::Error::AssemblyFailed) if the
    /// document cannot be produced.
    async fn assemble(
        &self,
        slides: &[LocalSlideFile],
        output: &Path,
        quality: u8,
    ) -> crate::Result<OutputArtifact>;

    /// Human-readable name for logging and progress messages
    fn name(&self) -> &str;
}
