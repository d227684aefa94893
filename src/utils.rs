//! Utility functions for output naming and directory handling

use crate::error::{Error, Result};
use crate::types::DocumentFormat;
use std::path::{Path, PathBuf};

/// Directory used when no output path is given
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

/// Derive the document file name from a presentation URL
///
/// The last two non-empty path segments are read as author and slide title,
/// giving `<title>-by-<author><ext>`. Characters outside `[A-Za-z0-9._-]` are
/// dropped so the name is safe on every filesystem.
///
/// # Examples
///
/// ```
/// use slidegrab::types::DocumentFormat;
/// use slidegrab::utils::derive_output_name;
///
/// let name = derive_output_name("http://site/author123/my-talk", DocumentFormat::Pdf).unwrap();
/// assert_eq!(name, "my-talk-by-author123.pdf");
/// ```
pub fn derive_output_name(page_url: &str, format: DocumentFormat) -> Result<String> {
    let parsed = url::Url::parse(page_url)
        .map_err(|e| Error::config("input", format!("invalid URL '{}': {}", page_url, e)))?;

    let segments: Vec<String> = parsed
        .path_segments()
        .map(|segments| {
            segments
                .map(sanitize_segment)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    match segments.as_slice() {
        [.., author, title] => Ok(format!("{}-by-{}{}", title, author, format.extension())),
        _ => Err(Error::config(
            "output",
            format!(
                "cannot derive a file name from '{}': expected /<author>/<slide-title>",
                page_url
            ),
        )),
    }
}

fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Resolve where the document is written
///
/// - `None`: `downloads/<derived name>`
/// - an existing directory, or a path ending in a separator: `<dir>/<derived name>`
/// - anything else is a file path; the format extension is appended when missing
pub fn resolve_output_path(
    page_url: &str,
    output: Option<&Path>,
    format: DocumentFormat,
) -> Result<PathBuf> {
    let (dir, file_name) = match output {
        None => (PathBuf::from(DEFAULT_OUTPUT_DIR), None),
        Some(path) if path.is_dir() || ends_with_separator(path) => (path.to_path_buf(), None),
        Some(path) => {
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            (dir, file_name)
        }
    };

    let ext = format.extension();
    let file_name = match file_name {
        Some(name) if name.ends_with(ext) => name,
        Some(name) => format!("{}{}", name, ext),
        None => derive_output_name(page_url, format)?,
    };

    Ok(dir.join(file_name))
}

fn ends_with_separator(path: &Path) -> bool {
    let raw = path.as_os_str().to_string_lossy();
    raw.ends_with('/') || raw.ends_with(std::path::MAIN_SEPARATOR)
}

/// Folder next to the document that receives retained slide images
///
/// Named after the document without its extension:
/// `downloads/talk-by-me.pdf` keeps its images in `downloads/talk-by-me`.
#[must_use]
pub fn retained_dir_for(output_path: &Path) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "slides".into());
    match output_path.parent() {
        Some(parent) => parent.join(stem),
        None => PathBuf::from(stem),
    }
}

/// Recursively copy `src` into a new directory `dest`
///
/// `dest` must not exist yet. Symlinks are not followed.
pub async fn copy_dir_all(src: &Path, dest: &Path) -> std::io::Result<u64> {
    use tokio::fs;

    let mut copied = 0;
    let mut pending = vec![(src.to_path_buf(), dest.to_path_buf())];

    while let Some((from, to)) = pending.pop() {
        fs::create_dir(&to).await?;
        let mut entries = fs::read_dir(&from).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            let target = to.join(entry.file_name());
            if file_type.is_dir() {
                pending.push((entry.path(), target));
            } else if file_type.is_file() {
                fs::copy(entry.path(), &target).await?;
                copied += 1;
            }
        }
    }

    Ok(copied)
}
