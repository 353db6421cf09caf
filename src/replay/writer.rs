//! Header artifact persistence.
//!
//! A parsed header can be written next to its replay as a standalone JSON
//! artifact: one header per file, UTF-8, newline-terminated. The original
//! payload is written verbatim when the model retained it, so a persisted
//! artifact parses back byte-identical.

use std::fmt;
use std::io;
use std::path::Path;

use crate::replay::model::ReplayHeader;
use crate::replay::parser::serialize;

/// Error type for artifact writes.
///
/// The in-memory model is untouched by a failed write.
#[derive(Debug)]
pub struct PersistError {
    path: String,
    source: io::Error,
}

impl PersistError {
    /// Path of the artifact that failed to write.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to write header artifact '{}': {}",
            self.path, self.source
        )
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Write a header to `path` as a newline-terminated JSON artifact.
pub async fn write_header_file(
    path: impl AsRef<Path>,
    header: &ReplayHeader,
) -> Result<(), PersistError> {
    let path = path.as_ref();
    let mut text = serialize(header);
    if !text.ends_with('\n') {
        text.push('\n');
    }

    tokio::fs::write(path, text).await.map_err(|source| PersistError {
        path: path.display().to_string(),
        source,
    })
}
