//! Artifact persistence and the ownership policy
//!
//! The filesystem holds no sidecar manifest of generated files; whether a
//! destination is machine-owned is re-derived at write time purely from the
//! managed marker in its current content. An existing file without the
//! marker belongs to the user and is skipped unless `--force` overrides the
//! guard. Managed files are fully regenerated, never patched.

use std::fs;
use std::path::PathBuf;

use crate::emit::{OutputArtifact, MANAGED_MARKER};
use crate::error::Result;

/// JSON spelling of the marker, carried by the structured server maps
const JSON_MANAGED_TAG: &str = "\"managedBy\": \"ctxkit\"";

/// True when `content` proves the file is machine-owned.
pub fn is_managed(content: &str) -> bool {
    content.contains(MANAGED_MARKER) || content.contains(JSON_MANAGED_TAG)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Report intended changes without touching disk
    Dry,
    Live,
}

/// What happened (or would happen) to one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    WouldWrite { bytes: usize },
    SkippedUnmanaged,
}

#[derive(Debug, Clone)]
pub struct WriteRecord {
    pub relative_path: String,
    pub outcome: WriteOutcome,
}

/// Applies the ownership policy while persisting artifacts under `root`
pub struct Writer {
    root: PathBuf,
    mode: WriteMode,
    force: bool,
    records: Vec<WriteRecord>,
}

impl Writer {
    pub fn new(root: impl Into<PathBuf>, mode: WriteMode, force: bool) -> Self {
        Self {
            root: root.into(),
            mode,
            force,
            records: Vec::new(),
        }
    }

    /// Persist one artifact. Failures are per-artifact; callers keep going
    /// with the remaining artifacts.
    pub fn write(&mut self, artifact: &OutputArtifact) -> Result<WriteOutcome> {
        let outcome = self.apply(artifact)?;
        self.records.push(WriteRecord {
            relative_path: artifact.relative_path.clone(),
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    fn apply(&self, artifact: &OutputArtifact) -> Result<WriteOutcome> {
        let target = self.root.join(&artifact.relative_path);

        if self.mode == WriteMode::Dry {
            return Ok(WriteOutcome::WouldWrite {
                bytes: artifact.content.len(),
            });
        }

        if target.exists() && !self.force {
            let existing = fs::read_to_string(&target)?;
            if !is_managed(&existing) {
                tracing::debug!(path = %artifact.relative_path, "skipping unmanaged file");
                return Ok(WriteOutcome::SkippedUnmanaged);
            }
        }

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&target, &artifact.content)?;
        Ok(WriteOutcome::Written)
    }

    /// Unified diff between the current file content and the artifact, for
    /// dry-run previews. `None` when the destination is absent, unreadable,
    /// or already identical.
    pub fn diff_preview(&self, artifact: &OutputArtifact) -> Option<String> {
        let existing = fs::read_to_string(self.root.join(&artifact.relative_path)).ok()?;
        if existing == artifact.content {
            return None;
        }
        let diff = similar::TextDiff::from_lines(&existing, &artifact.content);
        Some(
            diff.unified_diff()
                .header("current", "generated")
                .to_string(),
        )
    }

    pub fn records(&self) -> &[WriteRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn artifact(path: &str, content: &str) -> OutputArtifact {
        OutputArtifact {
            relative_path: path.to_string(),
            content: content.to_string(),
        }
    }

    fn managed_content(body: &str) -> String {
        format!("<!-- {MANAGED_MARKER} -->\n{body}")
    }

    #[test]
    fn test_dry_mode_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let mut writer = Writer::new(temp.path(), WriteMode::Dry, false);

        let art = artifact(".github/instructions/deep.md", "content");
        let outcome = writer.write(&art).unwrap();

        assert_eq!(outcome, WriteOutcome::WouldWrite { bytes: 7 });
        assert!(!temp.path().join(".github").exists());
        assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_new_file_is_written_with_directories() {
        let temp = TempDir::new().unwrap();
        let mut writer = Writer::new(temp.path(), WriteMode::Live, false);

        let art = artifact(".vscode/mcp.json", "{}");
        assert_eq!(writer.write(&art).unwrap(), WriteOutcome::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join(".vscode/mcp.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_unmanaged_file_is_skipped_and_unchanged() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("AGENTS.md"), "my own notes").unwrap();
        let mut writer = Writer::new(temp.path(), WriteMode::Live, false);

        let art = artifact("AGENTS.md", &managed_content("generated"));
        assert_eq!(writer.write(&art).unwrap(), WriteOutcome::SkippedUnmanaged);
        assert_eq!(
            fs::read_to_string(temp.path().join("AGENTS.md")).unwrap(),
            "my own notes"
        );
    }

    #[test]
    fn test_force_overrides_the_ownership_guard() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("AGENTS.md"), "my own notes").unwrap();
        let mut writer = Writer::new(temp.path(), WriteMode::Live, true);

        let art = artifact("AGENTS.md", &managed_content("generated"));
        assert_eq!(writer.write(&art).unwrap(), WriteOutcome::Written);
        let on_disk = fs::read_to_string(temp.path().join("AGENTS.md")).unwrap();
        assert!(on_disk.contains(MANAGED_MARKER));
        assert!(on_disk.contains("generated"));
    }

    #[test]
    fn test_managed_file_is_regenerated() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("AGENTS.md"),
            managed_content("old generated body"),
        )
        .unwrap();
        let mut writer = Writer::new(temp.path(), WriteMode::Live, false);

        let art = artifact("AGENTS.md", &managed_content("new generated body"));
        assert_eq!(writer.write(&art).unwrap(), WriteOutcome::Written);
        let on_disk = fs::read_to_string(temp.path().join("AGENTS.md")).unwrap();
        assert!(on_disk.contains("new generated body"));
        assert!(!on_disk.contains("old generated body"));
    }

    #[test]
    fn test_json_tag_counts_as_managed() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".mcp.json"),
            "{\n  \"managedBy\": \"ctxkit\",\n  \"mcpServers\": {}\n}\n",
        )
        .unwrap();
        let mut writer = Writer::new(temp.path(), WriteMode::Live, false);

        let art = artifact(".mcp.json", "{\n  \"managedBy\": \"ctxkit\"\n}\n");
        assert_eq!(writer.write(&art).unwrap(), WriteOutcome::Written);
    }

    #[test]
    fn test_records_accumulate_per_artifact() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("CLAUDE.md"), "hand-authored").unwrap();
        let mut writer = Writer::new(temp.path(), WriteMode::Live, false);

        writer.write(&artifact("AGENTS.md", &managed_content("a"))).unwrap();
        writer.write(&artifact("CLAUDE.md", &managed_content("c"))).unwrap();

        let outcomes: Vec<&WriteOutcome> =
            writer.records().iter().map(|r| &r.outcome).collect();
        assert_eq!(
            outcomes,
            vec![&WriteOutcome::Written, &WriteOutcome::SkippedUnmanaged]
        );
    }

    #[test]
    fn test_diff_preview_reports_changes_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("AGENTS.md"), "line one\n").unwrap();
        let writer = Writer::new(temp.path(), WriteMode::Dry, false);

        let same = artifact("AGENTS.md", "line one\n");
        assert!(writer.diff_preview(&same).is_none());

        let changed = artifact("AGENTS.md", "line two\n");
        let diff = writer.diff_preview(&changed).unwrap();
        assert!(diff.contains("-line one"));
        assert!(diff.contains("+line two"));

        let missing = artifact("NEW.md", "anything");
        assert!(writer.diff_preview(&missing).is_none());
    }
}
