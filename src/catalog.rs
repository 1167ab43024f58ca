//! MCP server catalog
//!
//! The catalog lives at `mcp/catalog.yaml` under the library root and maps
//! server names to connection descriptors, plus named toolsets grouping
//! servers for a repository flavor. An absent catalog is an empty catalog,
//! never an error.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Lookup tables for MCP servers and toolsets
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub servers: Vec<Server>,

    #[serde(default)]
    pub toolsets: Vec<Toolset>,
}

/// A single MCP server descriptor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub when_to_use: String,

    #[serde(rename = "type")]
    pub kind: ServerKind,

    /// Launch command, used for stdio servers
    #[serde(default)]
    pub command: Option<String>,

    /// Endpoint, used for remote servers; a placeholder is rendered when unset
    #[serde(default)]
    pub url: Option<String>,
}

/// Transport kind for an MCP server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerKind {
    Stdio,
    Remote,
}

/// A named group of server references, resolved by name at use time
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toolset {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub recommended_for_repo_types: Vec<String>,

    #[serde(default)]
    pub servers: Vec<String>,
}

impl Catalog {
    /// Load a catalog file. Callers treat a missing file as [`Catalog::default`].
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    pub fn find_server(&self, name: &str) -> Option<&Server> {
        self.servers.iter().find(|s| s.name == name)
    }

    pub fn find_toolset(&self, name: &str) -> Option<&Toolset> {
        self.toolsets.iter().find(|t| t.name == name)
    }

    /// Resolve the effective server-name list: the toolset's servers first,
    /// then the explicit ones, keeping first-seen order and dropping later
    /// duplicates. Names missing from the catalog are kept; renderers decide
    /// how to treat them.
    pub fn resolve_server_names(&self, toolset: Option<&str>, explicit: &[String]) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        if let Some(ts) = toolset.and_then(|name| self.find_toolset(name)) {
            for server in &ts.servers {
                if !names.contains(server) {
                    names.push(server.clone());
                }
            }
        }
        for server in explicit {
            if !names.contains(server) {
                names.push(server.clone());
            }
        }
        names
    }
}
