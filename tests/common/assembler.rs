//! Fake document assembler standing in for ImageMagick

use async_trait::async_trait;
use slidegrab::assembly::ordered_paths;
use slidegrab::types::DocumentFormat;
use slidegrab::{DocumentAssembler, LocalSlideFile, OutputArtifact, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Writes the slide file names, in the order received, into the output
///
/// Also records the inputs so tests can check what the converter saw.
#[derive(Default)]
pub struct RecordingAssembler {
    calls: Mutex<Vec<Vec<PathBuf>>>,
}

impl RecordingAssembler {
    /// File names passed on each call, in converter order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| {
                call.iter()
                    .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                    .collect()
            })
            .collect()
    }
}

#[async_trait]
impl DocumentAssembler for RecordingAssembler {
    async fn assemble(
        &self,
        slides: &[LocalSlideFile],
        output: &Path,
        quality: u8,
    ) -> Result<OutputArtifact> {
        let ordered: Vec<PathBuf> = ordered_paths(slides)
            .into_iter()
            .map(Path::to_path_buf)
            .collect();

        // Every input must still be readable when the converter runs.
        let mut contents = format!("quality={quality}\n");
        for path in &ordered {
            let bytes = tokio::fs::read(path).await?;
            contents.push_str(&format!("{} {}\n", path.display(), bytes.len()));
        }
        tokio::fs::write(output, contents).await?;

        self.calls.lock().unwrap().push(ordered);
        Ok(OutputArtifact {
            path: output.to_path_buf(),
            format: DocumentFormat::Pdf,
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}
