//! Shared MCP server rendering
//!
//! The canonical document lists every resolved name, falling back to the
//! bare name when the catalog cannot resolve it. The structured server maps
//! are stricter: an unresolvable name would produce an unusable entry, so
//! those skip it entirely.

use serde_json::{json, Map, Value};

use crate::catalog::{Catalog, ServerKind};
use crate::error::Result;

/// Literal substituted for a remote server whose URL is not configured yet
pub const URL_PLACEHOLDER: &str = "TODO: configure URL";

/// Markdown section for the canonical document. Empty when there are no
/// resolved names.
pub fn render_server_section(names: &[String], catalog: &Catalog) -> String {
    if names.is_empty() {
        return String::new();
    }

    let mut out = String::from(
        "## MCP Servers\n\nThe following MCP servers are configured. Use them when appropriate:\n\n",
    );
    for name in names {
        match catalog.find_server(name) {
            Some(server) => {
                out.push_str(&format!("- **{}**: {}\n", server.name, server.description));
                out.push_str(&format!("  - When to use: {}\n", server.when_to_use));
            }
            None => out.push_str(&format!("- **{name}**\n")),
        }
    }
    out.trim_end().to_string()
}

/// JSON server map shared by `.mcp.json` (`mcpServers`) and
/// `.vscode/mcp.json` (`servers`). Entries keep resolved order, each tagged
/// as machine-managed; the document itself carries the tag too so an empty
/// map still proves ownership to the writer.
pub fn render_server_map(top_key: &str, names: &[String], catalog: &Catalog) -> Result<String> {
    let mut entries = Map::new();
    for name in names {
        let Some(server) = catalog.find_server(name) else {
            continue;
        };

        let mut entry = Map::new();
        entry.insert("managedBy".to_string(), json!("ctxkit"));
        match server.kind {
            ServerKind::Stdio => {
                entry.insert("type".to_string(), json!("stdio"));
                entry.insert(
                    "command".to_string(),
                    json!(server.command.clone().unwrap_or_default()),
                );
            }
            ServerKind::Remote => {
                entry.insert("type".to_string(), json!("remote"));
                entry.insert(
                    "url".to_string(),
                    json!(server
                        .url
                        .clone()
                        .unwrap_or_else(|| URL_PLACEHOLDER.to_string())),
                );
            }
        }
        entries.insert(name.clone(), Value::Object(entry));
    }

    let mut root = Map::new();
    root.insert("managedBy".to_string(), json!("ctxkit"));
    root.insert(top_key.to_string(), Value::Object(entries));

    let mut rendered = serde_json::to_string_pretty(&Value::Object(root))?;
    rendered.push('\n');
    Ok(rendered)
}
