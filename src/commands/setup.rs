//! Setup command
//!
//! Runs the whole composition pipeline: decode the selection, resolve the
//! library root, merge fragments, project per-tool artifacts, and persist
//! them under the ownership policy. Recoverable resolution problems are
//! printed as warnings and never abort the run; only the preconditions
//! (selection file, schema version, library root) are fatal.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::emit::{self, WriteMode, WriteOutcome, Writer};
use crate::library::Library;
use crate::resolve::resolve;
use crate::selection::Selection;

/// Options for the setup command
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Path to the selection file
    pub config: PathBuf,
    /// Report intended changes without writing
    pub dry_run: bool,
    /// Overwrite files even when they lack the managed marker
    pub force: bool,
    /// Print per-artifact detail and dry-run diffs
    pub verbose: bool,
}

/// Execute the setup command
pub fn execute_setup(options: SetupOptions) -> Result<()> {
    if !options.config.is_file() {
        eprintln!(
            "{} Selection file not found: {}",
            style("✗").red(),
            options.config.display()
        );
        eprintln!("  Run 'ctxkit init' first to create one.");
        anyhow::bail!("selection file not found");
    }

    let selection = Selection::load(&options.config)?;
    let library = Library::resolve_or_fetch()?;
    if options.verbose {
        println!(
            "{} Using context library at {}",
            style("→").blue(),
            style(library.root().display()).cyan()
        );
    }
    let catalog = library.catalog()?;

    let resolution = resolve(&selection, &library, &catalog);
    for warning in &resolution.warnings {
        println!("  {} {}", style("!").yellow(), warning);
    }

    let artifacts = emit::project(&resolution, &selection, &catalog)?;

    let mode = if options.dry_run {
        WriteMode::Dry
    } else {
        WriteMode::Live
    };
    let mut writer = Writer::new(".", mode, options.force);

    let mut failures = 0usize;
    for artifact in &artifacts {
        if options.dry_run && options.verbose {
            if let Some(diff) = writer.diff_preview(artifact) {
                println!("{} {}", style("→").blue(), artifact.relative_path);
                print!("{diff}");
            }
        }
        // One bad artifact must not block the rest.
        if let Err(err) = writer.write(artifact) {
            failures += 1;
            eprintln!(
                "  {} {}: {}",
                style("✗").red(),
                artifact.relative_path,
                err
            );
        }
    }

    print_summary(&writer, options.dry_run);

    if !options.dry_run {
        println!("\n{}", style("Next steps:").bold());
        println!("  - Review generated files and commit them");
        println!("  - Authenticate MCP servers in VS Code / Claude / Codex if prompted");
    }

    if failures > 0 {
        println!(
            "  {} {} artifact(s) failed to write",
            style("!").yellow(),
            failures
        );
    }
    Ok(())
}

fn print_summary(writer: &Writer, dry_run: bool) {
    if dry_run {
        println!("\nDry run complete. Would generate:");
    } else {
        println!("\nSetup complete. Generated files:");
    }

    for record in writer.records() {
        match &record.outcome {
            WriteOutcome::Written => {
                println!("  {} {}", style("✓").green(), record.relative_path)
            }
            WriteOutcome::WouldWrite { bytes } => println!(
                "  {} {} ({} bytes)",
                style("~").blue(),
                record.relative_path,
                bytes
            ),
            WriteOutcome::SkippedUnmanaged => println!(
                "  {} {} (not managed by ctxkit, use --force)",
                style("!").yellow(),
                record.relative_path
            ),
        }
    }
}
