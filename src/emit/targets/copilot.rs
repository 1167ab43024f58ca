//! GitHub Copilot adapter
//!
//! Emits the inline instruction file plus one instruction file per declared
//! pack path-rule. Path-rule destinations collide by base file name; the
//! last pack in selection order wins, which is documented behavior.

use crate::emit::adapter::TargetAdapter;
use crate::emit::{OutputArtifact, ProjectContext, MANAGED_MARKER};
use crate::error::Result;
use crate::selection::Outputs;

/// Per-pack cap on inlined rule bullets
const MAX_KEY_CONSTRAINTS: usize = 8;

pub struct CopilotTarget;

impl TargetAdapter for CopilotTarget {
    fn name(&self) -> &'static str {
        "copilot"
    }

    fn enabled(&self, outputs: &Outputs) -> bool {
        outputs.copilot
    }

    fn render(&self, ctx: &ProjectContext) -> Result<Vec<OutputArtifact>> {
        let mut artifacts = vec![self.instructions(ctx)];
        artifacts.extend(self.path_instructions(ctx));
        Ok(artifacts)
    }
}

impl CopilotTarget {
    fn instructions(&self, ctx: &ProjectContext) -> OutputArtifact {
        let mut content = format!(
            "<!-- {MANAGED_MARKER} -->\n# Copilot Instructions\n\nRefer to [AGENTS.md](../AGENTS.md) for detailed project instructions.\n\n## Key Constraints\n\n"
        );

        for rules in &ctx.resolution.pack_rule_refs {
            for line in key_constraints(&rules.content, MAX_KEY_CONSTRAINTS) {
                content.push_str(line);
                content.push('\n');
            }
        }

        content.push_str(
            "\n## MCP Tools & Skills\n\nSee AGENTS.md for the full list of available MCP servers and skills.\n",
        );

        OutputArtifact {
            relative_path: ".github/copilot-instructions.md".to_string(),
            content,
        }
    }

    fn path_instructions(&self, ctx: &ProjectContext) -> Vec<OutputArtifact> {
        ctx.resolution
            .path_rule_refs
            .iter()
            .map(|rule| OutputArtifact {
                relative_path: format!(".github/instructions/{}", rule.id),
                content: format!("<!-- {MANAGED_MARKER} -->\n{}", rule.content),
            })
            .collect()
    }
}

/// The first `cap` lines of a rules fragment that are literal bullet items.
fn key_constraints(rules: &str, cap: usize) -> Vec<&str> {
    rules
        .lines()
        .filter(|line| line.starts_with("- "))
        .take(cap)
        .collect()
}
