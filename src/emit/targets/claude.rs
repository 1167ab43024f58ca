//! Claude Code adapter
//!
//! Emits `CLAUDE.md` (pointer to the canonical document plus build/test
//! command hints for recognized ecosystems) and the root-level `.mcp.json`
//! server map.

use crate::emit::adapter::TargetAdapter;
use crate::emit::servers::render_server_map;
use crate::emit::{OutputArtifact, ProjectContext, MANAGED_MARKER};
use crate::error::Result;
use crate::selection::Outputs;

/// Build/test/format hints for a recognized pack id
struct CommandHints {
    pack: &'static str,
    title: &'static str,
    lines: &'static [&'static str],
}

/// Pack ids with known toolchains. Unknown ids miss the lookup and simply
/// contribute nothing; extending the table is the only change needed to
/// recognize a new ecosystem.
const COMMAND_HINTS: &[CommandHints] = &[
    CommandHints {
        pack: "java",
        title: "Java Service Notes",
        lines: &[
            "- Build: `./gradlew build` or `./mvnw package`",
            "- Test: `./gradlew test` or `./mvnw test`",
            "- Format: `./gradlew spotlessApply`",
        ],
    },
    CommandHints {
        pack: "flutter",
        title: "Flutter Notes",
        lines: &[
            "- Dependencies: `flutter pub get`",
            "- Test: `flutter test`",
            "- Analyze: `dart analyze`",
            "- Format: `dart format .`",
        ],
    },
];

pub struct ClaudeTarget;

impl TargetAdapter for ClaudeTarget {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn enabled(&self, outputs: &Outputs) -> bool {
        outputs.claude
    }

    fn render(&self, ctx: &ProjectContext) -> Result<Vec<OutputArtifact>> {
        let root_doc = OutputArtifact {
            relative_path: "CLAUDE.md".to_string(),
            content: self.root_document(ctx),
        };
        let server_map = OutputArtifact {
            relative_path: ".mcp.json".to_string(),
            content: render_server_map(
                "mcpServers",
                &ctx.resolution.document.server_names,
                ctx.catalog,
            )?,
        };
        Ok(vec![root_doc, server_map])
    }
}

impl ClaudeTarget {
    fn root_document(&self, ctx: &ProjectContext) -> String {
        let mut content = format!(
            "<!-- {MANAGED_MARKER} -->\n# Claude Code Instructions\n\nRead and follow [AGENTS.md](AGENTS.md) for all project rules, conventions, and instructions.\n\n"
        );

        for pack_id in &ctx.selection.packs {
            if let Some(hints) = COMMAND_HINTS.iter().find(|h| h.pack == pack_id.as_str()) {
                content.push_str(&format!("## {}\n\n", hints.title));
                for line in hints.lines {
                    content.push_str(line);
                    content.push('\n');
                }
                content.push('\n');
            }
        }

        content.push_str(
            "## MCP Servers\n\nMCP servers are configured in `.mcp.json`. See AGENTS.md for when to use each server.\n",
        );
        content
    }
}
