//! Read-only access to the context library
//!
//! The library is a directory tree of reusable fragments:
//!
//! - `packs/<id>/pack.yaml` plus the pack's `rules.md`,
//!   `repo-instructions.md`, `skills/` and path-rule files
//! - `globals/<id>.md` standalone policy fragments
//! - `skills/<id>.skill.md` standalone skills
//! - `mcp/catalog.yaml` (optional)
//!
//! The root is resolved from, in priority order: the `CTXKIT_CONTEXT_ROOT`
//! environment override, a `./context` directory in the working tree, and
//! the user cache at `~/.ctxkit/context` (populated by [`crate::fetch`]).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::Catalog;
use crate::error::{CtxError, Result};

/// Environment override for the library root
pub const ROOT_ENV_VAR: &str = "CTXKIT_CONTEXT_ROOT";

/// Read-only handle on a resolved library root
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

/// Decoded `pack.yaml`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackManifest {
    pub id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub applies_to_repo_types: Vec<String>,

    #[serde(default)]
    pub default_globals: Vec<String>,

    #[serde(default)]
    pub default_skills: Vec<String>,

    #[serde(default)]
    pub default_mcp_toolset: Option<String>,

    /// Library-relative references to per-path instruction fragments
    #[serde(default)]
    pub path_rules: Vec<String>,
}

impl Library {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A directory qualifies as a library root when it has a `globals/`
    /// subdirectory.
    pub fn is_valid_root(dir: &Path) -> bool {
        dir.is_dir() && dir.join("globals").is_dir()
    }

    /// User-level cache populated by `ctxkit update` / the auto-fetch path.
    pub fn cache_dir() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".ctxkit").join("context"))
            .unwrap_or_else(|| PathBuf::from(".ctxkit/context"))
    }

    /// Resolve the library root without touching the network.
    pub fn resolve_root() -> Option<PathBuf> {
        if let Ok(env_root) = std::env::var(ROOT_ENV_VAR) {
            let path = PathBuf::from(env_root);
            if path.is_dir() {
                return Some(path);
            }
        }

        let local = PathBuf::from("context");
        if Self::is_valid_root(&local) {
            return Some(local.canonicalize().unwrap_or(local));
        }

        let cached = Self::cache_dir();
        if Self::is_valid_root(&cached) {
            return Some(cached);
        }

        None
    }

    /// Resolve the library root, downloading into the cache as a last
    /// resort. Failure to produce a valid root is fatal.
    pub fn resolve_or_fetch() -> Result<Self> {
        if let Some(root) = Self::resolve_root() {
            return Ok(Self::open(root));
        }

        let cache = Self::cache_dir();
        tracing::debug!(cache = %cache.display(), "library root not found locally, fetching");
        println!("Context library not found locally. Downloading...");
        crate::fetch::refresh_cache(&cache)?;
        if Self::is_valid_root(&cache) {
            println!("Context library cached at {}", cache.display());
            return Ok(Self::open(cache));
        }

        Err(CtxError::LibraryRootUnresolved)
    }

    /// Load a pack manifest by id. `None` means the pack directory or its
    /// `pack.yaml` does not exist; decode failures also resolve to `None`
    /// with a diagnostic, since a broken pack should not abort the run.
    pub fn pack_manifest(&self, id: &str) -> Option<PackManifest> {
        let path = self.root.join("packs").join(id).join("pack.yaml");
        let raw = read_if_present(&path)?;
        match serde_yaml::from_str::<PackManifest>(&raw) {
            Ok(manifest) => {
                if manifest.id != id {
                    tracing::warn!(
                        declared = %manifest.id,
                        directory = %id,
                        "pack manifest id does not match its directory"
                    );
                }
                Some(manifest)
            }
            Err(err) => {
                tracing::warn!(pack = %id, error = %err, "undecodable pack manifest");
                None
            }
        }
    }

    /// Read a file that lives inside a pack directory, e.g. `rules.md` or a
    /// path-rule reference.
    pub fn pack_fragment(&self, pack_id: &str, relative: &str) -> Option<String> {
        read_if_present(&self.root.join("packs").join(pack_id).join(relative))
    }

    pub fn global_fragment(&self, id: &str) -> Option<String> {
        read_if_present(&self.root.join("globals").join(format!("{id}.md")))
    }

    /// The ordered skill lookup scopes: the library-global `skills/`
    /// directory first, then each resolved pack's own `skills/` directory in
    /// pack-selection order.
    pub fn skill_scopes(&self, pack_ids: &[String]) -> Vec<PathBuf> {
        let mut scopes = vec![self.root.join("skills")];
        scopes.extend(
            pack_ids
                .iter()
                .map(|id| self.root.join("packs").join(id).join("skills")),
        );
        scopes
    }

    /// First-match-wins lookup across the given scopes.
    pub fn find_skill(&self, scopes: &[PathBuf], id: &str) -> Option<PathBuf> {
        scopes
            .iter()
            .map(|scope| scope.join(format!("{id}.skill.md")))
            .find(|candidate| candidate.is_file())
    }

    /// Load the MCP catalog; an absent file is an empty catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let path = self.root.join("mcp").join("catalog.yaml");
        if path.is_file() {
            Catalog::load(&path)
        } else {
            Ok(Catalog::default())
        }
    }
}

fn read_if_present(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unreadable fragment");
            None
        }
    }
}

/// Scan a skill fragment's leading metadata block for its `whenToUse:` hint.
///
/// The block is delimited by `---` markers at the very top of the file and is
/// scanned line by line; this is deliberately not a full YAML decode.
pub fn skill_hint(content: &str) -> Option<String> {
    let rest = content.strip_prefix("---")?;
    let end = rest.find("---")?;
    for line in rest[..end].lines() {
        if let Some(value) = line.trim().strip_prefix("whenToUse:") {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
