/*!
 * Text extraction for batches of input files
 *
 * Every source in a batch is read on the rayon pool and the results are
 * joined in input order. A single failed read fails the whole batch.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::error::{FileExportError, Result};
use crate::report::FileReportInfo;
use crate::types::FileRecord;

/// Something that can be read as one file of a batch
pub trait FileSource: Sync {
    /// Name recorded verbatim in the resulting record
    fn name(&self) -> &str;

    /// Read the raw bytes of the source
    fn read_bytes(&self) -> io::Result<Vec<u8>>;
}

/// A file on the local filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
}

impl LocalFile {
    /// Source named after the final component of `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .to_string();
        Self { path, name }
    }

    /// Source with an explicit declared name
    pub fn with_name(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Location on disk
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// Extraction statistics
#[derive(Debug, Clone, Default)]
pub struct ExtractStatistics {
    /// Number of files read
    pub files_processed: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Total number of bytes read
    pub total_bytes: u64,
    /// Per-file details, in batch order
    pub file_details: Vec<(String, FileReportInfo)>,
}

/// Reads batches of sources into file records
pub struct Extractor {
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    /// Extraction statistics
    statistics: Arc<Mutex<ExtractStatistics>>,
}

impl Extractor {
    /// Create a new extractor
    pub fn new(progress: Arc<ProgressBar>) -> Self {
        Self {
            progress,
            statistics: Arc::new(Mutex::new(ExtractStatistics::default())),
        }
    }

    /// Get extraction statistics
    pub fn get_statistics(&self) -> ExtractStatistics {
        self.statistics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Read every source and return the records in input order
    ///
    /// Reads run concurrently. If any of them fails the error is returned
    /// and no records are produced; statistics only change for batches that
    /// complete.
    pub fn extract<S: FileSource>(&self, sources: &[S]) -> Result<Vec<FileRecord>> {
        let results = sources
            .par_iter()
            .map(|source| self.read_source(source))
            .collect::<Result<Vec<_>>>()?;

        let mut stats = self
            .statistics
            .lock()
            .map_err(|_| FileExportError::Unexpected("statistics lock poisoned".to_string()))?;

        let mut records = Vec::with_capacity(results.len());
        for (record, info) in results {
            stats.files_processed += 1;
            stats.total_lines += info.lines;
            stats.total_chars += info.chars;
            stats.total_bytes += info.bytes;
            stats.file_details.push((record.name().to_string(), info));
            records.push(record);
        }

        Ok(records)
    }

    /// Read and decode a single source
    fn read_source<S: FileSource>(&self, source: &S) -> Result<(FileRecord, FileReportInfo)> {
        let name = source.name();
        let bytes = source.read_bytes().map_err(|e| FileExportError::Read {
            name: name.to_string(),
            source: e,
        })?;

        // Invalid UTF-8 is replaced rather than rejected
        let content = String::from_utf8_lossy(&bytes).into_owned();
        let info = FileReportInfo {
            lines: content.lines().count(),
            chars: content.chars().count(),
            bytes: bytes.len() as u64,
        };

        self.progress.inc(1);
        let display_name = if name.len() > 40 {
            let start = name.len().saturating_sub(37);
            let start = (start..name.len())
                .find(|&i| name.is_char_boundary(i))
                .unwrap_or(name.len());
            format!("...{}", &name[start..])
        } else {
            name.to_string()
        };
        self.progress
            .set_message(format!("Current file: {}", display_name));

        log::debug!("Read {} ({} bytes)", name, info.bytes);

        Ok((FileRecord::new(name, content), info))
    }
}
