/*!
 * filexport - Combine local text files into a single export
 *
 * This library reads batches of files as text and renders them together as
 * JSON, XML or Markdown, with optional copying to the system clipboard.
 */

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod extractor;
pub mod report;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use app::{AppEvent, AppState, StatusLevel, StatusMessage};
pub use clipboard::{ClipboardStrategy, ClipboardWriter};
pub use config::Config;
pub use error::{FileExportError, Result};
pub use extractor::{Extractor, FileSource, LocalFile};
pub use report::{ExportReport, FileReportInfo, ReportFormat, Reporter};
pub use types::{ExportFormat, FileRecord};
pub use utils::{collect_sources, format_file_size};
pub use writer::convert;
