#![forbid(unsafe_code)]

//! # ctxkit
//!
//! Composes tool-specific instruction files and MCP configs for AI coding
//! assistants from a shared, versioned context library.
//!
//! A repository declares what it wants in `ctxkit.yaml` (packs, globals,
//! skills, MCP toolset/servers, output toggles); `ctxkit setup` resolves
//! that selection against the library, merges the applicable fragments into
//! one canonical model, derives every enabled tool surface from it, and
//! writes the results under a managed-region ownership policy that leaves
//! hand-authored files alone.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use ctxkit::{Library, Selection};
//!
//! fn main() -> anyhow::Result<()> {
//!     let selection = Selection::load(Path::new("ctxkit.yaml"))?;
//!     let library = Library::resolve_or_fetch()?;
//!     let catalog = library.catalog()?;
//!
//!     let resolution = ctxkit::resolve(&selection, &library, &catalog);
//!     let artifacts = ctxkit::project(&resolution, &selection, &catalog)?;
//!     for artifact in &artifacts {
//!         println!("{} ({} bytes)", artifact.relative_path, artifact.content.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod library;
pub mod resolve;
pub mod selection;
pub mod template;
pub mod update;

// Re-exports
pub use catalog::{Catalog, Server, ServerKind, Toolset};
pub use emit::{
    project, OutputArtifact, TargetAdapter, WriteMode, WriteOutcome, WriteRecord, Writer,
    MANAGED_MARKER,
};
pub use error::{CtxError, Result};
pub use library::{Library, PackManifest};
pub use resolve::{resolve, MergedDocument, Resolution, SkillIndexEntry};
pub use selection::{Outputs, Selection, SCHEMA_VERSION};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
