//! Context library retrieval
//!
//! Downloads the library repository's branch archive and extracts only the
//! `context/` subtree into the local cache. The cache is replaced wholesale
//! on every refresh so stale fragments never linger.

use std::fs::{self, File};
use std::io::{self, Cursor, Read};
use std::path::Path;

use zip::ZipArchive;

use crate::error::{CtxError, Result};

/// GitHub repository hosting the CLI and the context library
pub const LIBRARY_REPO: &str = "ctxkit-dev/ctxkit";

/// Branch whose archive is fetched
pub const LIBRARY_BRANCH: &str = "main";

/// Subtree of the repository that holds the library
const LIBRARY_SUBDIR: &str = "context/";

/// Download the library archive and rebuild `target` from its `context/`
/// subtree.
pub fn refresh_cache(target: &Path) -> Result<()> {
    let url = format!(
        "https://github.com/{LIBRARY_REPO}/archive/refs/heads/{LIBRARY_BRANCH}.zip"
    );
    tracing::debug!(%url, "downloading context library archive");

    let response = ureq::get(&url)
        .set("User-Agent", "ctxkit")
        .call()
        .map_err(|err| CtxError::Fetch(err.to_string()))?;

    let mut bytes = Vec::new();
    response.into_reader().read_to_end(&mut bytes)?;

    if target.is_dir() {
        fs::remove_dir_all(target)?;
    }
    fs::create_dir_all(target)?;

    extract_library(&bytes, target)
}

/// Extract the `context/` subtree of a repository archive into `target`.
///
/// The archive's single top-level directory is discovered from the first
/// entry (GitHub names it `<repo>-<branch>/`), so the extraction works for
/// any branch name.
fn extract_library(data: &[u8], target: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut prefix: Option<String> = None;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        if prefix.is_none() {
            if let Some(slash) = name.find('/') {
                prefix = Some(format!("{}{LIBRARY_SUBDIR}", &name[..=slash]));
            }
        }
        let Some(prefix) = prefix.as_deref() else {
            continue;
        };
        let Some(relative) = name.strip_prefix(prefix) else {
            continue;
        };
        if relative.is_empty() || relative.contains("..") {
            continue;
        }

        let out_path = target.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out_file = File::create(&out_path)?;
            io::copy(&mut entry, &mut out_file)?;
        }
    }

    Ok(())
}
