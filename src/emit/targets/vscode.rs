//! VS Code adapter - the editor-integrated MCP server map

use crate::emit::adapter::TargetAdapter;
use crate::emit::servers::render_server_map;
use crate::emit::{OutputArtifact, ProjectContext};
use crate::error::Result;
use crate::selection::Outputs;

pub struct VscodeMcpTarget;

impl TargetAdapter for VscodeMcpTarget {
    fn name(&self) -> &'static str {
        "vscode-mcp"
    }

    fn enabled(&self, outputs: &Outputs) -> bool {
        outputs.vscode_mcp
    }

    fn render(&self, ctx: &ProjectContext) -> Result<Vec<OutputArtifact>> {
        Ok(vec![OutputArtifact {
            relative_path: ".vscode/mcp.json".to_string(),
            content: render_server_map(
                "servers",
                &ctx.resolution.document.server_names,
                ctx.catalog,
            )?,
        }])
    }
}
