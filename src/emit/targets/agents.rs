//! Canonical cross-tool document (`AGENTS.md`)
//!
//! Every other artifact points back here. Sections appear in fixed order
//! and empty sections are omitted rather than emitted blank.

use crate::emit::adapter::TargetAdapter;
use crate::emit::servers::render_server_section;
use crate::emit::{OutputArtifact, ProjectContext, MANAGED_MARKER};
use crate::error::Result;
use crate::resolve::SkillIndexEntry;
use crate::selection::Outputs;

pub struct AgentsTarget;

impl TargetAdapter for AgentsTarget {
    fn name(&self) -> &'static str {
        "agents"
    }

    fn enabled(&self, _outputs: &Outputs) -> bool {
        // The canonical document is the anchor for everything else and is
        // always generated.
        true
    }

    fn render(&self, ctx: &ProjectContext) -> Result<Vec<OutputArtifact>> {
        let doc = &ctx.resolution.document;

        let sections: Vec<String> = [
            doc.repo_instructions.clone(),
            doc.pack_rules.clone(),
            doc.globals.clone(),
            render_server_section(&doc.server_names, ctx.catalog),
            render_skills_section(&doc.skills_index),
        ]
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect();

        let mut content = format!(
            "<!-- {MANAGED_MARKER} -->\n# Project Instructions\n\nThis file is generated by `ctxkit setup`. Do not edit managed sections manually.\n"
        );
        if !sections.is_empty() {
            content.push('\n');
            content.push_str(&sections.join("\n\n---\n\n"));
            content.push('\n');
        }

        Ok(vec![OutputArtifact {
            relative_path: "AGENTS.md".to_string(),
            content,
        }])
    }
}

fn render_skills_section(index: &[SkillIndexEntry]) -> String {
    if index.is_empty() {
        return String::new();
    }

    let mut out = String::from(
        "## Available Skills\n\nThe following skills are available. Use them when the situation matches:\n\n",
    );
    for entry in index {
        match &entry.hint {
            Some(hint) => out.push_str(&format!("- **{}**: {}\n", entry.id, hint)),
            None => out.push_str(&format!("- **{}**\n", entry.id)),
        }
    }
    out.trim_end().to_string()
}
