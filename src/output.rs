//! Converted-file naming and saving.

use crate::error::ConvertError;
use crate::request::{ConversionResult, OutputFormat};
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name used when the document did not come from an uploaded file.
pub const DEFAULT_BASE_NAME: &str = "document";

/// A successful conversion ready for download.
#[derive(Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub file_name: String,
    pub result: ConversionResult,
}

impl fmt::Debug for ConvertedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertedFile")
            .field("file_name", &self.file_name)
            .field("result", &self.result)
            .finish()
    }
}

impl ConvertedFile {
    pub fn bytes(&self) -> &[u8] {
        &self.result.bytes
    }

    pub fn is_archive(&self) -> bool {
        self.result.is_archive()
    }
}

/// Strip the last extension from a file name (`report.md` → `report`).
///
/// Names without a dot, or ending in a dot, are returned unchanged.
pub fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => stem,
        _ => name,
    }
}

/// Build the download name `{base}-{YYYY-MM-DD}.{ext}`.
///
/// `ext` is `zip` for archive results regardless of `format`.
pub fn generate_filename(
    source_name: Option<&str>,
    format: OutputFormat,
    is_archive: bool,
    date: NaiveDate,
) -> String {
    let base = source_name.map_or(DEFAULT_BASE_NAME, strip_extension);
    let ext = if is_archive { "zip" } else { format.as_str() };
    format!("{base}-{}.{ext}", date.format("%Y-%m-%d"))
}

/// Today's calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Last path component of `name`, so a saved file always lands inside its
/// target directory. Names with no usable component fall back to
/// [`DEFAULT_BASE_NAME`].
fn safe_file_name(name: &str) -> &str {
    name.rsplit(['/', '\\'])
        .next()
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .unwrap_or(DEFAULT_BASE_NAME)
}

/// Write a converted file into `dir`, returning the final path.
///
/// Uses atomic write (temp file + rename) to prevent partial files. Only the
/// last component of `file.file_name` is used.
pub async fn save_to_dir(
    file: &ConvertedFile,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, ConvertError> {
    let dir = dir.as_ref();
    let name = safe_file_name(&file.file_name);
    let path = dir.join(name);
    let write_err = |source| ConvertError::OutputWriteFailed {
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(dir).await.map_err(write_err)?;

    let tmp_path = dir.join(format!(".{name}.tmp"));
    let written = match tokio::fs::write(&tmp_path, file.bytes()).await {
        Ok(()) => tokio::fs::rename(&tmp_path, &path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }

    info!("Saved {} ({} bytes)", path.display(), file.bytes().len());
    Ok(path)
}
