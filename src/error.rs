use std::path::PathBuf;

/// Failures that stop a load. Row-level defects never surface here; those rows
/// are dropped by the normalizer and sanitizer instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("source `{}` is unavailable: {reason}", .source_path.display())]
    SourceUnavailable { source_path: PathBuf, reason: String },
    #[error(
        "source `{}` has none of the expected columns (found: {})",
        .source_path.display(),
        .found.join(", ")
    )]
    Schema {
        source_path: PathBuf,
        found: Vec<String>,
    },
}

impl LoadError {
    pub(crate) fn unavailable(path: &std::path::Path, reason: impl ToString) -> Self {
        LoadError::SourceUnavailable {
            source_path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
