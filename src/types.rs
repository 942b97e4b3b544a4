/*!
 * Core types and data structures for the filexport application
 */

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::FileExportError;

/// Text contents of one input file
///
/// Records are immutable once the extractor has built them. Duplicate names
/// are allowed; a record has no identity beyond its position in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    name: String,
    content: String,
}

impl FileRecord {
    /// Create a record from a declared name and decoded content
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Declared file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded text content
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Output format of the combined export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of name/content objects
    #[default]
    Json,
    /// `<files>` element with one `<file>` child per record
    Xml,
    /// A heading and fenced code block per record
    #[strum(to_string = "markdown", serialize = "md")]
    Markdown,
}

impl ExportFormat {
    /// Parse a format tag, reporting unknown tags as an error
    pub fn parse(tag: &str) -> Result<Self, FileExportError> {
        Self::from_str(tag.trim()).map_err(|_| FileExportError::UnknownFormat(tag.to_string()))
    }
}
