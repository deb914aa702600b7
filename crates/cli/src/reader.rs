// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Size-gated file reading for analyzers.
//!
//! Files above the size cap are rejected before any bytes are read, so one
//! oversized input fails its own file without stalling the run.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::check::AnalysisError;

/// Size at which to log a large-file notice (1MB).
pub const LARGE_FILE_WARN: u64 = 1024 * 1024;

/// Maximum file size to read (10MB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Size-gated file reader.
#[derive(Debug, Clone, Copy)]
pub struct FileReader {
    /// Maximum file size to read.
    max_size: u64,
}

impl Default for FileReader {
    fn default() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
        }
    }
}

impl FileReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with custom max size.
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Read a file's bytes, checking the size limit first.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>, AnalysisError> {
        let io_err = |source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        };

        let size = std::fs::metadata(path).map_err(io_err)?.len();
        if size > self.max_size {
            return Err(AnalysisError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                max_size: self.max_size,
            });
        }

        if size > LARGE_FILE_WARN {
            tracing::info!(
                path = %path.display(),
                size_mb = size as f64 / 1_000_000.0,
                "reading large file"
            );
        }

        let mut file = File::open(path).map_err(io_err)?;
        let mut buffer = Vec::with_capacity(size as usize);
        file.read_to_end(&mut buffer).map_err(io_err)?;
        Ok(buffer)
    }

    /// Read a file as UTF-8 text.
    pub fn read_text(&self, path: &Path) -> Result<String, AnalysisError> {
        String::from_utf8(self.read(path)?).map_err(|_| AnalysisError::NotUtf8 {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
