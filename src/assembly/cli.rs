//! ImageMagick-based assembler using an external binary

use super::ordered_paths;
use super::traits::DocumentAssembler;
use crate::config::ConverterTool;
use crate::error::Error;
use crate::types::{DocumentFormat, LocalSlideFile, OutputArtifact};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Modern ImageMagick 7 entry point
pub const MAGICK: &str = "magick";

/// Legacy ImageMagick 6 command name
pub const CONVERT: &str = "convert";

/// Assembler that runs ImageMagick as a subprocess
///
/// The command line is `<tool> <slides...> -quality <q> <output>`, passed as an
/// argument vector so file names are never interpreted by a shell.
pub struct ImageMagickAssembler {
    binary_path: PathBuf,
    name: String,
}

impl ImageMagickAssembler {
    /// Create an assembler with an explicit binary path or command name
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        let binary_path = binary_path.into();
        let name = binary_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| binary_path.display().to_string());
        Self { binary_path, name }
    }

    /// Pick the converter for `tool`
    ///
    /// [`ConverterTool::Auto`] prefers `magick` when it is on PATH and falls
    /// back to `convert` otherwise. Explicit choices are used as-is.
    pub fn detect(tool: ConverterTool) -> Self {
        if let Some(command) = tool.command() {
            return Self::new(command);
        }

        match which::which(MAGICK) {
            Ok(path) => {
                tracing::debug!(?path, "found magick on PATH");
                Self::new(path)
            }
            Err(_) => {
                tracing::debug!("magick not found on PATH, falling back to convert");
                Self::new(CONVERT)
            }
        }
    }

    /// Path or command name of the binary that will be executed
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Argument vector passed to the converter
    pub fn command_args(
        &self,
        slides: &[LocalSlideFile],
        output: &Path,
        quality: u8,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = ordered_paths(slides)
            .into_iter()
            .map(|p| p.as_os_str().to_os_string())
            .collect();
        args.push("-quality".into());
        args.push(quality.to_string().into());
        args.push(output.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl DocumentAssembler for ImageMagickAssembler {
    async fn assemble(
        &self,
        slides: &[LocalSlideFile],
        output: &Path,
        quality: u8,
    ) -> crate::Result<OutputArtifact> {
        let failed = |reason: String| Error::AssemblyFailed {
            output: output.to_path_buf(),
            reason,
        };

        if slides.is_empty() {
            return Err(failed("no slides to assemble".to_string()));
        }

        tracing::debug!(
            tool = %self.name,
            slides = slides.len(),
            ?output,
            "running converter"
        );

        let result = Command::new(&self.binary_path)
            .args(self.command_args(slides, output, quality))
            .output()
            .await
            .map_err(|e| failed(format!("failed to execute {}: {}", self.name, e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(failed(format!(
                "{} exited with {}: {}",
                self.name,
                result.status,
                stderr.trim()
            )));
        }

        Ok(OutputArtifact {
            path: output.to_path_buf(),
            format: DocumentFormat::Pdf,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
