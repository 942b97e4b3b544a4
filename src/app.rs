/*!
 * Application state for the export shell
 *
 * The shell never mutates state directly. It turns whatever happened into an
 * `AppEvent` and applies it, which keeps the extractor and the writers free
 * of any notion of "current" data.
 */

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::types::{ExportFormat, FileRecord};
use crate::writer::convert;

/// How long a status message stays visible
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

/// Transient message about the most recent action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub issued_at: Instant,
}

impl StatusMessage {
    fn new(text: impl Into<String>, level: StatusLevel, issued_at: Instant) -> Self {
        Self {
            text: text.into(),
            level,
            issued_at,
        }
    }

    /// Whether the message is still shown at `now`
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.issued_at) < STATUS_TIMEOUT
    }
}

/// Something that happened to the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A batch was read successfully; it replaces the previous one
    BatchLoaded(Vec<FileRecord>),
    /// Reading a batch failed; the previous records are kept
    BatchFailed(String),
    /// The user picked an export format
    FormatSelected(ExportFormat),
    /// A clipboard copy finished with the given outcome
    CopyFinished(bool),
    /// Drop all records
    Cleared,
}

/// Everything the shell shows
#[derive(Debug, Clone, Default)]
pub struct AppState {
    records: Vec<FileRecord>,
    format: ExportFormat,
    status: Option<StatusMessage>,
}

impl AppState {
    /// Empty state with the default format
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of the current batch
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Selected export format
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Apply an event that happened at `now`
    pub fn apply(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::BatchLoaded(records) => {
                log::debug!("Loaded batch of {} files", records.len());
                self.records = records;
            }
            AppEvent::BatchFailed(reason) => {
                log::debug!("Batch discarded: {}", reason);
                self.status = Some(StatusMessage::new(
                    format!("Failed to read files: {}", reason),
                    StatusLevel::Error,
                    now,
                ));
            }
            AppEvent::FormatSelected(format) => self.format = format,
            AppEvent::CopyFinished(true) => {
                self.status = Some(StatusMessage::new(
                    "Copied to clipboard",
                    StatusLevel::Success,
                    now,
                ));
            }
            AppEvent::CopyFinished(false) => {
                self.status = Some(StatusMessage::new(
                    "Failed to copy to clipboard",
                    StatusLevel::Error,
                    now,
                ));
            }
            AppEvent::Cleared => {
                self.records.clear();
                self.status = None;
            }
        }
    }

    /// Status message still visible at `now`, if any
    pub fn status_at(&self, now: Instant) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|status| status.is_visible_at(now))
    }

    /// Render the current records in the selected format
    pub fn export(&self) -> Result<String> {
        convert(&self.records, self.format)
    }
}
