use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata about a file reached through a content resolver.
///
/// Values are stored exactly as the resolver reported them. Nothing is
/// validated: an empty URI, an empty name or a negative size are all carried
/// as-is. Once built the record is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    uri: String,
    display_name: String,
    mime_type: Option<String>,
    size: i64,
}

impl FileRecord {
    pub fn new(
        uri: impl Into<String>,
        display_name: impl Into<String>,
        mime_type: Option<String>,
        size: i64,
    ) -> Self {
        Self {
            uri: uri.into(),
            display_name: display_name.into(),
            mime_type,
            size,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// `None` when the resolver could not determine a media type.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Size in bytes.
    pub fn size(&self) -> i64 {
        self.size
    }

    /// Returns `(uri, display_name, mime_type, size)`.
    pub fn into_parts(self) -> (String, String, Option<String>, i64) {
        (self.uri, self.display_name, self.mime_type, self.size)
    }
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} bytes)",
            self.display_name,
            self.mime_type.as_deref().unwrap_or("unknown"),
            self.size
        )
    }
}
