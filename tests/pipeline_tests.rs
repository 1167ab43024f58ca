//! End-to-end composition pipeline tests
//!
//! Each test builds a small context library in a temp directory, resolves a
//! selection against it, and inspects the projected artifacts.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use ctxkit::{project, resolve, Catalog, Library, OutputArtifact, Selection};

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A library with one pack, one global, skills in both scopes, and a catalog.
fn sample_library() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write_file(
        root,
        "packs/java/pack.yaml",
        "id: java\ndescription: Java service conventions\ndefaultMcpToolset: backend-default\npathRules:\n  - path-rules/backend.instructions.md\n",
    );
    write_file(
        root,
        "packs/java/repo-instructions.md",
        "## Java Repository Layout\n\nServices live under `services/`.",
    );
    write_file(
        root,
        "packs/java/rules.md",
        "- Use constructor injection\n- Never catch Throwable\nPlain prose line.\n- Prefer records for DTOs",
    );
    write_file(
        root,
        "packs/java/path-rules/backend.instructions.md",
        "Backend-specific guidance.\n",
    );
    write_file(
        root,
        "packs/java/skills/java-service-skeleton.skill.md",
        "---\nwhenToUse: Creating a new Java service\n---\nSkeleton steps.\n",
    );
    write_file(root, "globals/pr-review.md", "Always request two reviewers.");
    write_file(
        root,
        "skills/pr-review-checklist.skill.md",
        "---\nwhenToUse: Reviewing a pull request\n---\nChecklist body.\n",
    );
    write_file(
        root,
        "mcp/catalog.yaml",
        r#"servers:
  - name: internal-docs
    description: Internal documentation search
    whenToUse: Looking up internal design docs
    type: stdio
    command: docs-mcp --stdio
  - name: service-catalog
    description: Service ownership lookup
    whenToUse: Finding the owning team
    type: remote
toolsets:
  - name: backend-default
    servers: [internal-docs]
"#,
    );

    temp
}

fn selection(yaml: &str) -> Selection {
    serde_yaml::from_str(yaml).unwrap()
}

fn run(library_root: &Path, selection_yaml: &str) -> (Vec<OutputArtifact>, Vec<String>) {
    let library = Library::open(library_root);
    let catalog = library.catalog().unwrap();
    let sel = selection(selection_yaml);
    let resolution = resolve(&sel, &library, &catalog);
    let warnings = resolution.warnings.clone();
    let artifacts = project(&resolution, &sel, &catalog).unwrap();
    (artifacts, warnings)
}

fn find<'a>(artifacts: &'a [OutputArtifact], path: &str) -> &'a OutputArtifact {
    artifacts
        .iter()
        .find(|a| a.relative_path == path)
        .unwrap_or_else(|| panic!("missing artifact {path}"))
}

#[test]
fn test_java_service_scenario() {
    let library = sample_library();
    let (artifacts, warnings) = run(
        library.path(),
        "packs: [java]\nglobals: [pr-review]\nskills: [pr-review-checklist]\nmcp:\n  toolset: backend-default\n",
    );
    assert_eq!(warnings, Vec::<String>::new());

    let agents = &find(&artifacts, "AGENTS.md").content;
    assert!(agents.contains("## Java Repository Layout"));
    assert!(agents.contains("Always request two reviewers."));
    assert!(agents.contains("- **internal-docs**: Internal documentation search"));
    // Only the toolset's server shows up; the other catalog entry does not.
    assert!(!agents.contains("service-catalog"));
    assert!(agents.contains("- **pr-review-checklist**: Reviewing a pull request"));

    let mcp = &find(&artifacts, ".mcp.json").content;
    let parsed: serde_json::Value = serde_json::from_str(mcp).unwrap();
    assert!(parsed["mcpServers"]["internal-docs"].is_object());
    assert_eq!(parsed["mcpServers"]["internal-docs"]["type"], "stdio");
    assert_eq!(parsed["mcpServers"].as_object().unwrap().len(), 1);
}

#[test]
fn test_canonical_sections_keep_fixed_order_and_omit_empty() {
    let library = sample_library();
    let (artifacts, _) = run(
        library.path(),
        "packs: [java]\nglobals: [pr-review]\nskills: [pr-review-checklist]\n",
    );
    let agents = &find(&artifacts, "AGENTS.md").content;

    let repo = agents.find("## Java Repository Layout").unwrap();
    let rules = agents.find("- Use constructor injection").unwrap();
    let globals = agents.find("Always request two reviewers.").unwrap();
    let mcp = agents.find("## MCP Servers").unwrap();
    let skills = agents.find("## Available Skills").unwrap();
    assert!(repo < rules && rules < globals && globals < mcp && mcp < skills);

    // Without any MCP selection the pack default still applies, so drop it
    // explicitly to observe the omitted section.
    let (artifacts, _) = run(library.path(), "globals: [pr-review]\n");
    let agents = &find(&artifacts, "AGENTS.md").content;
    assert!(!agents.contains("## MCP Servers"));
    assert!(!agents.contains("## Available Skills"));
    assert!(agents.contains("Always request two reviewers."));
}

#[test]
fn test_resolution_is_idempotent_byte_for_byte() {
    let library = sample_library();
    let yaml = "packs: [java]\nglobals: [pr-review]\nskills: [pr-review-checklist, java-service-skeleton]\n";

    let (first, _) = run(library.path(), yaml);
    let (second, _) = run(library.path(), yaml);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.relative_path, b.relative_path);
        assert_eq!(a.content, b.content);
    }
}

#[test]
fn test_toolset_and_explicit_servers_merge_in_order() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "globals/placeholder.md", "x");
    write_file(
        temp.path(),
        "mcp/catalog.yaml",
        "servers:\n  - name: a\n    type: stdio\n    command: a\n  - name: b\n    type: stdio\n    command: b\n  - name: c\n    type: stdio\n    command: c\ntoolsets:\n  - name: t\n    servers: [a, b]\n",
    );

    let library = Library::open(temp.path());
    let catalog = library.catalog().unwrap();
    let sel = selection("mcp:\n  toolset: t\n  servers: [b, c]\n");
    let resolution = resolve(&sel, &library, &catalog);

    assert_eq!(resolution.document.server_names, vec!["a", "b", "c"]);
}

#[test]
fn test_skill_in_both_scopes_resolves_to_global() {
    let library = sample_library();
    let root = library.path();
    write_file(
        root,
        "skills/java-service-skeleton.skill.md",
        "---\nwhenToUse: Global skeleton hint\n---\nGlobal skeleton body.\n",
    );

    let lib = Library::open(root);
    let catalog = lib.catalog().unwrap();
    let sel = selection("packs: [java]\nskills: [java-service-skeleton]\n");
    let resolution = resolve(&sel, &lib, &catalog);

    assert!(resolution.document.skills_body.contains("Global skeleton body."));
    assert!(!resolution.document.skills_body.contains("Skeleton steps."));
    assert_eq!(
        resolution.document.skills_index[0].hint.as_deref(),
        Some("Global skeleton hint")
    );
}

#[test]
fn test_nonexistent_pack_warns_and_contributes_nothing() {
    let library = sample_library();
    let (with_ghost, warnings) = run(
        library.path(),
        "packs: [ghost]\nglobals: [pr-review]\nmcp:\n  servers: [internal-docs]\n",
    );
    assert_eq!(warnings, vec!["pack not found: ghost"]);

    let (without, _) = run(
        library.path(),
        "globals: [pr-review]\nmcp:\n  servers: [internal-docs]\n",
    );
    for (a, b) in with_ghost.iter().zip(without.iter()) {
        assert_eq!(a.relative_path, b.relative_path);
        assert_eq!(a.content, b.content, "ghost pack changed {}", a.relative_path);
    }
}

#[test]
fn test_absent_catalog_renders_zero_servers() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "globals/pr-review.md", "Review policy.");

    let (artifacts, _) = run(
        temp.path(),
        "globals: [pr-review]\nmcp:\n  toolset: backend-default\n",
    );

    let agents = &find(&artifacts, "AGENTS.md").content;
    assert!(!agents.contains("## MCP Servers"));

    let parsed: serde_json::Value =
        serde_json::from_str(&find(&artifacts, ".mcp.json").content).unwrap();
    assert_eq!(parsed["mcpServers"].as_object().unwrap().len(), 0);
    let parsed: serde_json::Value =
        serde_json::from_str(&find(&artifacts, ".vscode/mcp.json").content).unwrap();
    assert_eq!(parsed["servers"].as_object().unwrap().len(), 0);
}

#[test]
fn test_unknown_server_listed_bare_in_docs_but_skipped_in_maps() {
    let library = sample_library();
    let (artifacts, warnings) = run(library.path(), "mcp:\n  servers: [internal-docs, mystery]\n");

    assert_eq!(warnings, vec!["MCP server not in catalog: mystery"]);

    let agents = &find(&artifacts, "AGENTS.md").content;
    assert!(agents.contains("- **mystery**"));

    let codex = &find(&artifacts, ".codex/config.toml").content;
    assert!(codex.contains("# mystery"));

    let parsed: serde_json::Value =
        serde_json::from_str(&find(&artifacts, ".mcp.json").content).unwrap();
    assert!(parsed["mcpServers"].get("mystery").is_none());
}

#[test]
fn test_copilot_inline_excerpt_and_path_rules() {
    let library = sample_library();
    let (artifacts, _) = run(library.path(), "packs: [java]\n");

    let copilot = &find(&artifacts, ".github/copilot-instructions.md").content;
    assert!(copilot.contains("- Use constructor injection"));
    assert!(copilot.contains("- Prefer records for DTOs"));
    assert!(!copilot.contains("Plain prose line."));

    let path_rule = find(&artifacts, ".github/instructions/backend.instructions.md");
    assert!(path_rule.content.contains("Backend-specific guidance."));
}

#[test]
fn test_output_toggles_gate_artifacts() {
    let library = sample_library();
    let (artifacts, _) = run(
        library.path(),
        "packs: [java]\noutputs:\n  copilot: false\n  codex: false\n",
    );

    let paths: Vec<&str> = artifacts.iter().map(|a| a.relative_path.as_str()).collect();
    assert!(paths.contains(&"AGENTS.md"));
    assert!(paths.contains(&"CLAUDE.md"));
    assert!(paths.contains(&".mcp.json"));
    assert!(paths.contains(&".vscode/mcp.json"));
    assert!(!paths.iter().any(|p| p.starts_with(".github/")));
    assert!(!paths.contains(&".codex/config.toml"));
}

#[test]
fn test_claude_doc_carries_java_command_hints() {
    let library = sample_library();
    let (artifacts, _) = run(library.path(), "packs: [java]\n");

    let claude = &find(&artifacts, "CLAUDE.md").content;
    assert!(claude.contains("## Java Service Notes"));
    assert!(claude.contains("- Test: `./gradlew test` or `./mvnw test`"));
}
