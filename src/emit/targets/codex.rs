//! Codex adapter
//!
//! Emits a comment-only configuration skeleton. Unlike the structured
//! server maps this surface lists every resolved name, with a description
//! when the catalog resolves it and bare otherwise.

use crate::emit::adapter::TargetAdapter;
use crate::emit::{OutputArtifact, ProjectContext, MANAGED_MARKER};
use crate::error::Result;
use crate::selection::Outputs;

pub struct CodexTarget;

impl TargetAdapter for CodexTarget {
    fn name(&self) -> &'static str {
        "codex"
    }

    fn enabled(&self, outputs: &Outputs) -> bool {
        outputs.codex
    }

    fn render(&self, ctx: &ProjectContext) -> Result<Vec<OutputArtifact>> {
        let names = &ctx.resolution.document.server_names;

        let mut content = format!("# Codex configuration\n# {MANAGED_MARKER}\n\n");
        if !names.is_empty() {
            content.push_str("# MCP servers (authenticate via your tool's sign-in flow)\n");
            for name in names {
                match ctx.catalog.find_server(name) {
                    Some(server) => {
                        content.push_str(&format!("# {}: {}\n", server.name, server.description))
                    }
                    None => content.push_str(&format!("# {name}\n")),
                }
            }
        }
        content.push_str("\n# See AGENTS.md for project instructions and conventions.\n");

        Ok(vec![OutputArtifact {
            relative_path: ".codex/config.toml".to_string(),
            content,
        }])
    }
}
