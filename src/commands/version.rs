//! Version command
//!
//! Prints the CLI and schema versions plus a best-effort update hint.

use anyhow::Result;
use console::style;

use crate::selection::SCHEMA_VERSION;
use crate::update;

/// Execute the version command
pub fn execute_version() -> Result<()> {
    println!("ctxkit version {}", crate::VERSION);
    println!("Schema version: {SCHEMA_VERSION}");

    if let Some(hint) = update::update_hint() {
        println!("\n{} {hint}", style("!").yellow());
    }
    Ok(())
}
