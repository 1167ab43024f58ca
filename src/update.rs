//! Release update checks
//!
//! Best-effort only: every network problem resolves to "no hint" rather
//! than an error, since update availability must never fail a command.

use serde::Deserialize;

use crate::fetch::LIBRARY_REPO;

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Latest release tag (`vX.Y.Z`) from the GitHub API, if reachable.
pub fn fetch_latest_tag() -> Option<String> {
    let url = format!("https://api.github.com/repos/{LIBRARY_REPO}/releases/latest");
    let release: Release = ureq::get(&url)
        .set("User-Agent", "ctxkit")
        .call()
        .ok()?
        .into_json()
        .ok()?;
    Some(release.tag_name)
}

/// Parse `v1.2.3` or `1.2.3` into its numeric components.
pub fn parse_semver(tag: &str) -> Option<(u32, u32, u32)> {
    let re = regex::Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)$").expect("semver pattern");
    let caps = re.captures(tag.trim())?;
    Some((
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

/// True when `candidate` is a strictly newer release than `current`.
/// Unparseable tags never count as newer.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    match (parse_semver(candidate), parse_semver(current)) {
        (Some(candidate), Some(current)) => candidate > current,
        _ => false,
    }
}

/// One-line upgrade hint when a newer release exists.
pub fn update_hint() -> Option<String> {
    let latest = fetch_latest_tag()?;
    let current = format!("v{}", crate::VERSION);
    is_newer(&latest, &current)
        .then(|| format!("Update available: {current} -> {latest}. Run: cargo install ctxkit"))
}
