//! Conversion between `file:` URIs and local paths.

use crate::error::ResolveError;
use std::path::{Path, PathBuf};
use url::{ParseError, Url};

const FILE_SCHEME: &str = "file";

/// Returns the scheme of `uri`, if it has one.
///
/// A single-letter scheme is a Windows drive (`C:\...`), not a scheme.
pub fn scheme(uri: &str) -> Option<&str> {
    let url = Url::parse(uri).ok()?;
    let len = url.scheme().len();
    if len < 2 {
        return None;
    }
    let head = uri.trim_start().get(..len)?;
    head.eq_ignore_ascii_case(url.scheme()).then_some(head)
}

/// Maps a `file:` URI or a bare path onto a local path.
pub fn to_local_path(uri: &str) -> Result<PathBuf, ResolveError> {
    if uri.is_empty() {
        return Err(ResolveError::InvalidUri(uri.to_string()));
    }
    let url = match Url::parse(uri) {
        Ok(url) if url.scheme().len() < 2 => return Ok(PathBuf::from(uri)),
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => return Ok(PathBuf::from(uri)),
        Err(_) => return Err(ResolveError::InvalidUri(uri.to_string())),
    };
    if url.scheme() != FILE_SCHEME {
        return Err(ResolveError::UnsupportedScheme(url.scheme().to_string()));
    }
    if !has_valid_escapes(url.path()) {
        return Err(ResolveError::InvalidUri(uri.to_string()));
    }
    url.to_file_path()
        .map_err(|_| ResolveError::InvalidUri(uri.to_string()))
}

/// Builds a `file://` URI for an absolute `path`.
pub fn from_local_path(path: &Path) -> Result<String, ResolveError> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|_| ResolveError::InvalidUri(path.to_string_lossy().into_owned()))
}

// `url` keeps malformed escapes such as `%zz` verbatim instead of rejecting them.
fn has_valid_escapes(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || (bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}
