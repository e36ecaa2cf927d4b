//! Per-target plain-text output files

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::FetchResult;
use crate::error::{PulseError, Result};
use crate::target::Target;

/// Writes `{key}_views.txt` and `{key}_image_url.txt` into one directory
#[derive(Debug, Clone)]
pub struct OutputSink {
    dir: PathBuf,
}

impl OutputSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn views_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}_views.txt"))
    }

    pub fn image_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}_image_url.txt"))
    }

    /// Overwrite both files for `target` with `result`
    ///
    /// An empty thumbnail is replaced by the target's fallback image, when it has one.
    pub fn write(&self, target: &Target, result: &FetchResult) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let key = target.key();
        let image = if result.thumbnail_url.is_empty() {
            target.fallback_image.as_deref().unwrap_or("")
        } else {
            result.thumbnail_url.as_str()
        };

        write_atomic(&self.views_path(&key), &result.formatted_views)?;
        write_atomic(&self.image_path(&key), image)?;
        Ok(())
    }
}

/// Replace `path` with `contents` via a sibling temp file and a rename
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        PulseError::InvalidArgument(format!("not a file path: {}", path.display()))
    })?;

    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
