use std::path::PathBuf;

use thiserror::Error;

/// Failures that callers may want to tell apart. Everything else travels as
/// `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("catalog returned status {status:?}")]
    CatalogStatus { status: String },

    #[error("catalog payload has no result")]
    CatalogMissingResult,

    #[error("solutions directory {0:?} is not readable")]
    SolutionsDir(PathBuf),

    #[error("the crate was built without the `reqwest` feature")]
    NetworkDisabled,
}
