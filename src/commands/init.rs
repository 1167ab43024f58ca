//! Init command
//!
//! Scaffolds `ctxkit.yaml` in the current directory. The template
//! pre-selects pack, toolset, and skills for a known repository type;
//! without `--repo-type` an interactive picker runs unless `--yes` was
//! given.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Select};

use crate::template;

/// Repository flavors the template knows how to pre-select
const REPO_TYPES: &[&str] = &["java-service", "flutter-app"];

const TEMPLATE: &str = "\
# ctxkit context configuration
# Uncomment the options you want, then run: ctxkit setup
schemaVersion: 1

{{repoTypeSection}}
packs:
{{packsSection}}

globals:
  - pr-review
  - testing
  # - security

skills:
  - pr-review-checklist
{{skillsSection}}
mcp:
{{toolsetSection}}  # servers:
  #   - internal-docs
  #   - service-catalog
  #   - runbooks

outputs:
  copilot: true
  claude: true
  codex: true
  vscodeMcp: true
";

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Preselect a repository type
    pub repo_type: Option<String>,
    /// Overwrite an existing selection file
    pub force: bool,
    /// Skip interactive prompts
    pub yes: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    let target = PathBuf::from("ctxkit.yaml");
    if target.exists() && !options.force {
        eprintln!(
            "{} ctxkit.yaml already exists. Use --force to overwrite.",
            style("✗").red()
        );
        anyhow::bail!("selection file already exists");
    }

    let repo_type = match options.repo_type {
        Some(repo_type) => Some(repo_type),
        None if options.yes => None,
        None => prompt_repo_type()?,
    };

    std::fs::write(&target, selection_template(repo_type.as_deref()))?;
    println!("{} Created ctxkit.yaml", style("✓").green());
    println!(
        "Next: edit the file to select your pack and options, then run: {}",
        style("ctxkit setup").cyan()
    );
    Ok(())
}

fn prompt_repo_type() -> Result<Option<String>> {
    let mut items: Vec<&str> = REPO_TYPES.to_vec();
    items.push("other / decide later");

    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Repository type")
        .items(&items)
        .default(items.len() - 1)
        .interact()?;

    Ok(REPO_TYPES.get(picked).map(|s| s.to_string()))
}

/// Build the selection file body for the given repository type.
fn selection_template(repo_type: Option<&str>) -> String {
    let is_java = repo_type == Some("java-service");
    let is_flutter = repo_type == Some("flutter-app");

    let repo_type_section = match repo_type {
        Some(repo_type) => format!("repoType: {repo_type}\n"),
        None => "# repoType: java-service\n# repoType: flutter-app\n".to_string(),
    };

    let packs_section = format!(
        "{}\n{}",
        if is_java { "  - java" } else { "  # - java" },
        if is_flutter {
            "  - flutter"
        } else {
            "  # - flutter"
        }
    );

    let mut skills_section = String::new();
    if is_java {
        skills_section.push_str("  - java-service-skeleton\n");
    } else {
        skills_section.push_str("  # - java-service-skeleton\n");
    }
    if is_flutter {
        skills_section.push_str("  - flutter-feature-patterns\n");
    } else {
        skills_section.push_str("  # - flutter-feature-patterns\n");
    }

    let toolset_section = if is_java {
        "  toolset: backend-default\n"
    } else if is_flutter {
        "  toolset: frontend-default\n"
    } else {
        "  # toolset: backend-default\n  # toolset: frontend-default\n"
    };

    let vars: HashMap<String, String> = [
        ("repoTypeSection", repo_type_section),
        ("packsSection", packs_section),
        ("skillsSection", skills_section),
        ("toolsetSection", toolset_section.to_string()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();

    template::render(TEMPLATE, &vars)
}
