//! Per-repository selection file (`ctxkit.yaml`)
//!
//! The selection file declares which packs, globals, skills, and MCP servers
//! a repository wants, plus per-tool output toggles. It is decoded once per
//! invocation and immutable afterwards. Unknown fields are ignored so older
//! CLIs keep working against newer files, but a schema version above
//! [`SCHEMA_VERSION`] is a hard stop.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CtxError, Result};

/// Highest selection schema version this build understands.
pub const SCHEMA_VERSION: u32 = 1;

/// Decoded form of `ctxkit.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Repository flavor, e.g. `java-service` or `flutter-app`
    #[serde(default)]
    pub repo_type: Option<String>,

    /// Pack ids, in selection order
    #[serde(default, deserialize_with = "null_to_default")]
    pub packs: Vec<String>,

    /// Global policy ids, in selection order
    #[serde(default, deserialize_with = "null_to_default")]
    pub globals: Vec<String>,

    /// Skill ids, in selection order
    #[serde(default, deserialize_with = "null_to_default")]
    pub skills: Vec<String>,

    #[serde(default, deserialize_with = "null_to_default")]
    pub mcp: McpSelection,

    #[serde(default, deserialize_with = "null_to_default")]
    pub outputs: Outputs,
}

/// A key that is present but explicitly empty (`packs:` with every entry
/// commented out decodes as null) falls back to the field default, matching
/// the missing-key behavior.
fn null_to_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// MCP toolset / server selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpSelection {
    /// Named toolset from the catalog; falls back to the first selected
    /// pack's default when unset
    #[serde(default)]
    pub toolset: Option<String>,

    /// Explicit server names, appended after the toolset's servers
    #[serde(default, deserialize_with = "null_to_default")]
    pub servers: Vec<String>,
}

/// Per-tool output toggles; everything is generated by default
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outputs {
    #[serde(default = "default_true")]
    pub copilot: bool,

    #[serde(default = "default_true")]
    pub claude: bool,

    #[serde(default = "default_true")]
    pub codex: bool,

    #[serde(default = "default_true")]
    pub vscode_mcp: bool,
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            copilot: true,
            claude: true,
            codex: true,
            vscode_mcp: true,
        }
    }
}

fn default_schema_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Selection {
    /// Load and validate a selection file.
    ///
    /// A missing file, an undecodable document, and a schema version newer
    /// than [`SCHEMA_VERSION`] are all fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CtxError::SelectionNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let selection: Selection =
            serde_yaml::from_str(&raw).map_err(|source| CtxError::SelectionParse {
                path: path.to_path_buf(),
                source,
            })?;
        if selection.schema_version > SCHEMA_VERSION {
            return Err(CtxError::SchemaTooNew {
                found: selection.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(selection)
    }
}
