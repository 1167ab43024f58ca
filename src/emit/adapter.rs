//! Target adapter trait - implement for each tool surface

use crate::emit::{OutputArtifact, ProjectContext};
use crate::error::Result;
use crate::selection::Outputs;

/// A tool surface that derives one or more artifacts from the merged model
pub trait TargetAdapter {
    /// Short identifier used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether the selection's output toggles enable this target
    fn enabled(&self, outputs: &Outputs) -> bool;

    /// Render the artifacts for this target. Rendering is pure with respect
    /// to the filesystem; only the writer touches disk.
    fn render(&self, ctx: &ProjectContext) -> Result<Vec<OutputArtifact>>;
}
