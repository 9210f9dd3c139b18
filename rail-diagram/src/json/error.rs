//! Railway document error types.

use std::io;

/// Errors reading or writing a railway document.
///
/// Content problems inside a well-formed document (unknown station pairs,
/// unparsable times, duplicate names) are not errors; they are reported as
/// diagnostics and the offending entry is skipped.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// The document is not valid JSON or does not have the railway shape
    #[error("malformed railway document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document file could not be read
    #[error("cannot read railway document: {0}")]
    Io(#[from] io::Error),
}
