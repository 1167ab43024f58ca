//! List command
//!
//! Enumerates what the context library offers: packs, globals, skills in
//! both scopes, and the MCP catalog.

use anyhow::Result;
use console::style;

use crate::library::Library;

/// Execute the list command
pub fn execute_list() -> Result<()> {
    let library = Library::resolve_or_fetch()?;
    println!(
        "{} Context library at {}",
        style("→").blue(),
        style(library.root().display()).cyan()
    );

    let packs = sorted_entries(&library.root().join("packs"), |name| Some(name.to_string()));
    println!("\n{}", style("Packs:").bold());
    if packs.is_empty() {
        println!("  (none)");
    }
    for pack_id in &packs {
        match library.pack_manifest(pack_id) {
            Some(manifest) => {
                let mut line = format!("  {} {}", style(pack_id).cyan(), manifest.description);
                if !manifest.applies_to_repo_types.is_empty() {
                    let types = manifest.applies_to_repo_types.join(", ");
                    line.push_str(&format!(" {}", style(format!("[{types}]")).dim()));
                }
                if let Some(toolset) = &manifest.default_mcp_toolset {
                    line.push_str(&format!(" {}", style(format!("(toolset: {toolset})")).dim()));
                }
                println!("{line}");
            }
            None => println!(
                "  {} {}",
                style(pack_id).cyan(),
                style("(missing pack.yaml)").dim()
            ),
        }
    }

    println!("\n{}", style("Globals:").bold());
    for id in sorted_entries(&library.root().join("globals"), |name| {
        name.strip_suffix(".md").map(str::to_string)
    }) {
        println!("  {id}");
    }

    println!("\n{}", style("Skills:").bold());
    for id in sorted_entries(&library.root().join("skills"), skill_id) {
        println!("  {id}");
    }
    for pack_id in &packs {
        for id in sorted_entries(&library.root().join("packs").join(pack_id).join("skills"), skill_id)
        {
            println!("  {id} {}", style(format!("(pack {pack_id})")).dim());
        }
    }

    let catalog = library.catalog()?;
    println!("\n{}", style("MCP servers:").bold());
    if catalog.servers.is_empty() {
        println!("  (none)");
    }
    for server in &catalog.servers {
        println!("  {} {}", style(&server.name).cyan(), server.description);
    }
    println!("\n{}", style("MCP toolsets:").bold());
    if catalog.toolsets.is_empty() {
        println!("  (none)");
    }
    for toolset in &catalog.toolsets {
        println!(
            "  {} [{}]",
            style(&toolset.name).cyan(),
            toolset.servers.join(", ")
        );
    }

    Ok(())
}

fn skill_id(name: &str) -> Option<String> {
    name.strip_suffix(".skill.md").map(str::to_string)
}

/// Directory entries mapped through `to_id`, sorted for stable output. An
/// absent directory is simply empty.
fn sorted_entries(dir: &std::path::Path, to_id: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut ids: Vec<String> = entries
        .flatten()
        .filter_map(|entry| to_id(&entry.file_name().to_string_lossy()))
        .collect();
    ids.sort();
    ids
}
