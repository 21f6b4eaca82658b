//! Whole-file line storage shared by the three tables.
//!
//! A table is always read in full and rewritten in full; rewrites go through a
//! sibling `.tmp` file and a rename so a reader never sees a half-written table.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// One persisted table file
#[derive(Debug, Clone)]
pub struct FlatFile {
    path: PathBuf,
}

impl FlatFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Short name used in diagnostics
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Create the file (and its directory) empty if it does not exist yet
    pub fn ensure_exists(&self) -> AppResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        if !self.path.exists() {
            fs::File::create(&self.path)?;
            tracing::debug!("Created empty table file {:?}", self.path);
        }
        Ok(())
    }

    /// Read every non-blank line, paired with its 1-based line number.
    ///
    /// A missing file reads as an empty table.
    pub fn read_lines(&self) -> AppResult<Vec<(usize, String)>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim().to_string()))
            .filter(|(_, line)| !line.is_empty())
            .collect())
    }

    /// Replace the file content with `lines`, one per line
    pub fn write_lines<I>(&self, lines: I) -> AppResult<usize>
    where
        I: IntoIterator<Item = String>,
    {
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut count = 0;
        {
            let mut writer = BufWriter::new(fs::File::create(&tmp_path)?);
            for line in lines {
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
                count += 1;
            }
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!("Rewrote {:?} ({} lines)", self.path, count);
        Ok(count)
    }

    /// Build a format error pointing at `line` of this file
    pub fn format_error(&self, line: usize, message: impl Into<String>) -> AppError {
        AppError::Format {
            file: self.name(),
            line,
            message: message.into(),
        }
    }
}
