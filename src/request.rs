//! Request and result types exchanged with the conversion API.

use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ── Enums ────────────────────────────────────────────────────────────────

/// Markup language of typed-in content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputFormat {
    #[default]
    Markdown,
    Html,
}

impl InputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Markdown => "markdown",
            InputFormat::Html => "html",
        }
    }

    /// Name used in user-facing messages ("Markdown", "HTML").
    pub fn display_name(self) -> &'static str {
        match self {
            InputFormat::Markdown => "Markdown",
            InputFormat::Html => "HTML",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(InputFormat::Markdown),
            "html" => Ok(InputFormat::Html),
            other => Err(ConvertError::InvalidRequest(format!(
                "Unsupported input format: {other}"
            ))),
        }
    }
}

/// Requested output document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
    Jpg,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Pdf, OutputFormat::Png, OutputFormat::Jpg];

    /// Lowercase wire name, also the file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
        }
    }

    /// Uppercase label ("PDF", "PNG", "JPG").
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "PDF",
            OutputFormat::Png => "PNG",
            OutputFormat::Jpg => "JPG",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Jpg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            other => Err(ConvertError::InvalidRequest(format!(
                "Unsupported output format: {other}"
            ))),
        }
    }
}

// ── Request ──────────────────────────────────────────────────────────────

/// A named file to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping only its final path component as name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ConvertError::InputReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Where the document to convert comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Typed-in text.
    Text {
        content: String,
        input_format: InputFormat,
    },
    /// An uploaded `.html`/`.md`/`.markdown` file.
    File(UploadFile),
}

/// A single conversion: source, target format and image dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source: Source,
    pub output_format: OutputFormat,
    /// Image width in pixels; ignored for PDF output.
    pub width: u32,
    /// Image height in pixels; ignored for PDF output.
    pub height: u32,
}

impl ConversionRequest {
    pub fn text(content: impl Into<String>, input_format: InputFormat) -> Self {
        Self::with_source(Source::Text {
            content: content.into(),
            input_format,
        })
    }

    pub fn file(file: UploadFile) -> Self {
        Self::with_source(Source::File(file))
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            output_format: OutputFormat::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check the request is dispatchable: text content must be non-empty and
    /// dimensions positive.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if let Source::Text { content, .. } = &self.source {
            if content.is_empty() {
                return Err(ConvertError::InvalidRequest(
                    "Either content or file must be provided".into(),
                ));
            }
        }
        if self.output_format.is_image() && (self.width == 0 || self.height == 0) {
            return Err(ConvertError::InvalidRequest(
                "Image width and height must be positive".into(),
            ));
        }
        Ok(())
    }
}

// ── Results ──────────────────────────────────────────────────────────────

/// MIME types that mark a multi-page archive result.
pub const ARCHIVE_MIME_TYPES: [&str; 2] = ["application/zip", "application/x-zip-compressed"];

/// Binary payload returned by a successful conversion.
#[derive(Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub bytes: Vec<u8>,
    /// `content-type` declared by the API, if any.
    pub content_type: Option<String>,
}

impl fmt::Debug for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionResult")
            .field("size", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

impl ConversionResult {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }

    /// MIME essence: lowercase, parameters stripped.
    pub fn mime_essence(&self) -> Option<String> {
        self.content_type.as_deref().map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    /// True when the API bundled several pages into a zip archive.
    pub fn is_archive(&self) -> bool {
        self.mime_essence()
            .is_some_and(|m| ARCHIVE_MIME_TYPES.contains(&m.as_str()))
    }
}

/// Body of `GET /health`.
///
/// Any JSON object is accepted; `status` is only filled in when the server
/// reports one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
