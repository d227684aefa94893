//! Configuration types for slidegrab
//!
//! A [`Config`] is built once from command-line input and handed to the
//! pipeline by reference. Nothing in the crate reads mutable global defaults.

use crate::error::{Error, Result};
use crate::types::DocumentFormat;
use crate::utils::{resolve_output_path, retained_dir_for};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HTTP settings shared by the page fetch and every slide download
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Timeout applied to every request (default: 20 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Which ImageMagick command assembles the document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConverterTool {
    /// Use `magick` if it is on PATH, otherwise `convert`
    #[default]
    Auto,
    /// Always use `magick` (ImageMagick 7)
    Magick,
    /// Always use the legacy `convert` command
    Convert,
}

impl ConverterTool {
    /// Command name for an explicit choice, `None` for [`ConverterTool::Auto`]
    pub fn command(&self) -> Option<&'static str> {
        match self {
            ConverterTool::Auto => None,
            ConverterTool::Magick => Some("magick"),
            ConverterTool::Convert => Some("convert"),
        }
    }
}

/// Document assembly settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Converter selection (default: auto-detect)
    #[serde(default)]
    pub tool: ConverterTool,

    /// Quality passed to the converter, 1-100 (default: 100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Document format
    #[serde(default)]
    pub format: DocumentFormat,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            tool: ConverterTool::default(),
            quality: default_quality(),
            format: DocumentFormat::default(),
        }
    }
}

/// Where the document goes and what is kept next to it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Full path of the document
    pub path: PathBuf,

    /// Keep downloaded images in a folder next to the document (default: false)
    #[serde(default)]
    pub retain_images: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(crate::utils::DEFAULT_OUTPUT_DIR),
            retain_images: false,
        }
    }
}

/// Main configuration for a run
///
/// # Examples
///
/// ```
/// use slidegrab::Config;
///
/// let config = Config::new("http://site/author123/my-talk", None).unwrap();
/// assert!(config.output.path.ends_with("my-talk-by-author123.pdf"));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Presentation page URL
    pub page_url: String,

    /// Output document settings
    #[serde(default)]
    pub output: OutputConfig,

    /// HTTP settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Converter settings
    #[serde(default)]
    pub assembly: AssemblyConfig,

    /// Parent directory for the temporary working area (default: system temp dir)
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

impl Config {
    /// Build a configuration for `page_url`, resolving the output path
    ///
    /// `output` may be a file or a directory; see
    /// [`resolve_output_path`](crate::utils::resolve_output_path).
    pub fn new(page_url: impl Into<String>, output: Option<&Path>) -> Result<Self> {
        let page_url = page_url.into().trim().to_string();
        let assembly = AssemblyConfig::default();
        let path = resolve_output_path(&page_url, output, assembly.format)?;

        let config = Self {
            page_url,
            output: OutputConfig {
                path,
                retain_images: false,
            },
            fetch: FetchConfig::default(),
            assembly,
            work_dir: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.page_url).map_err(|e| {
            Error::config("input", format!("invalid URL '{}': {}", self.page_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(
                "input",
                format!("unsupported URL scheme '{}'", parsed.scheme()),
            ));
        }
        if self.output.path.file_name().is_none() {
            return Err(Error::config(
                "output",
                format!("'{}' does not name a file", self.output.path.display()),
            ));
        }
        if self.assembly.quality == 0 || self.assembly.quality > 100 {
            return Err(Error::config(
                "quality",
                format!("quality must be 1-100, got {}", self.assembly.quality),
            ));
        }
        if self.fetch.timeout.is_zero() {
            return Err(Error::config("timeout", "timeout must be non-zero"));
        }
        Ok(())
    }

    /// Directory the document is written into
    pub fn output_dir(&self) -> &Path {
        self.output.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Folder receiving retained images
    pub fn retained_dir(&self) -> PathBuf {
        retained_dir_for(&self.output.path)
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_user_agent() -> String {
    concat!("slidegrab/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_quality() -> u8 {
    100
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
