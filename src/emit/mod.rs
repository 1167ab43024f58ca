//! Output projection
//!
//! Derives the per-tool artifacts from one resolved selection and writes
//! them under the managed-content ownership policy.
//!
//! ## Generated artifacts
//!
//! - `AGENTS.md` (canonical cross-tool document, always)
//! - `.github/copilot-instructions.md` + `.github/instructions/*` (Copilot)
//! - `CLAUDE.md` + `.mcp.json` (Claude Code)
//! - `.codex/config.toml` (Codex)
//! - `.vscode/mcp.json` (VS Code)
//!
//! Every artifact is computed from the same immutable resolution snapshot
//! before anything touches disk, so write order across artifacts never
//! matters.

pub mod adapter;
pub mod servers;
pub mod targets;
pub mod writer;

pub use adapter::TargetAdapter;
pub use writer::{WriteMode, WriteOutcome, WriteRecord, Writer};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::resolve::Resolution;
use crate::selection::Selection;

/// The marker that tags generated content as machine-owned. The writer
/// refuses to overwrite an existing file that does not carry it (§ ownership
/// policy in [`writer`]).
pub const MANAGED_MARKER: &str = "managed-by: ctxkit";

/// One file to be written, as a workspace-relative path plus full content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub relative_path: String,
    pub content: String,
}

/// Everything a target adapter may draw on when rendering
#[derive(Debug, Clone, Copy)]
pub struct ProjectContext<'a> {
    pub resolution: &'a Resolution,
    pub selection: &'a Selection,
    pub catalog: &'a Catalog,
}

/// Project the resolution into the artifacts for every enabled target.
pub fn project(
    resolution: &Resolution,
    selection: &Selection,
    catalog: &Catalog,
) -> Result<Vec<OutputArtifact>> {
    let ctx = ProjectContext {
        resolution,
        selection,
        catalog,
    };

    let mut artifacts = Vec::new();
    for target in targets::all() {
        if !target.enabled(&selection.outputs) {
            tracing::debug!(target = target.name(), "output disabled");
            continue;
        }
        let rendered = target.render(&ctx)?;
        tracing::debug!(target = target.name(), count = rendered.len(), "rendered");
        artifacts.extend(rendered);
    }
    Ok(artifacts)
}
