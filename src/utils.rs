/*!
 * Utility functions for filexport
 */

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::extractor::LocalFile;

/// Turn command-line paths into an ordered batch of sources
///
/// Paths keep their command-line order. With `recursive`, each directory is
/// replaced by the files beneath it, sorted by name and named relative to
/// the directory's parent. Without it a directory is passed through as is
/// and fails when read.
pub fn collect_sources(paths: &[PathBuf], recursive: bool) -> io::Result<Vec<LocalFile>> {
    let mut sources = Vec::with_capacity(paths.len());

    for path in paths {
        if recursive && path.is_dir() {
            sources.extend(walk_directory(path)?);
        } else {
            sources.push(LocalFile::new(path));
        }
    }

    Ok(sources)
}

fn walk_directory(dir: &Path) -> io::Result<Vec<LocalFile>> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let name = match dir.file_name() {
            Some(root) => Path::new(root).join(rel_path),
            None => rel_path.to_path_buf(),
        };

        sources.push(LocalFile::with_name(
            entry.path(),
            name.to_string_lossy().to_string(),
        ));
    }

    Ok(sources)
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
