//! Error types for ctxkit
//!
//! Fatal preconditions (missing or undecodable selection file, unsupported
//! schema version, unresolvable library root) surface as hard errors and end
//! the run. Everything else during resolution is recoverable and reported as
//! warnings, not errors.

use std::path::PathBuf;

/// Result type for ctxkit library operations
pub type Result<T> = std::result::Result<T, CtxError>;

/// Errors that can occur while composing context files
#[derive(Debug, thiserror::Error)]
pub enum CtxError {
    #[error("selection file not found: {0}")]
    SelectionNotFound(PathBuf),

    #[error("failed to parse {path}: {source}")]
    SelectionParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("selection schema version {found} is newer than supported ({supported}); upgrade ctxkit")]
    SchemaTooNew { found: u32, supported: u32 },

    #[error(
        "cannot locate the context library; set CTXKIT_CONTEXT_ROOT, add a ./context directory, or run `ctxkit update`"
    )]
    LibraryRootUnresolved,

    #[error("failed to fetch the context library: {0}")]
    Fetch(String),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
