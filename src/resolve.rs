//! Selection resolution
//!
//! Turns a [`Selection`] plus the library and catalog into a
//! [`MergedDocument`]: the ordered concatenation of every applicable
//! fragment, the skills index, and the resolved MCP server-name list.
//!
//! Resolution runs in two phases. First it collects ordered
//! [`FragmentRef`]s per section, which keeps "what was selected" pure and
//! inspectable; a separate render step then joins the contents. Every
//! unresolvable id is a warning, never an error, and the order of the
//! remaining entries is preserved.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::library::{skill_hint, Library, PackManifest};
use crate::selection::Selection;
use crate::template;

/// A fragment selected for inclusion, recorded before any text is joined
#[derive(Debug, Clone)]
pub struct FragmentRef {
    /// The id (or destination file name, for path rules) this fragment was
    /// resolved from
    pub id: String,
    /// Library-relative origin, kept for diagnostics
    pub path: PathBuf,
    pub content: String,
}

/// One line of the skills index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillIndexEntry {
    pub id: String,
    pub hint: Option<String>,
}

/// The canonical merged model every output artifact derives from
#[derive(Debug, Clone, Default)]
pub struct MergedDocument {
    pub repo_instructions: String,
    pub pack_rules: String,
    pub globals: String,
    pub skills_body: String,
    pub skills_index: Vec<SkillIndexEntry>,
    /// Ordered, duplicate-free; may contain names absent from the catalog
    pub server_names: Vec<String>,
}

/// Resolution output: the merged document plus the per-pack detail the
/// projector needs (per-pack rules for excerpts, path-rule fragments) and
/// the accumulated warnings.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub document: MergedDocument,
    /// Resolved pack ids, selection order
    pub pack_ids: Vec<String>,
    /// Per-pack rules fragments, selection order
    pub pack_rule_refs: Vec<FragmentRef>,
    /// Path-rule fragments across all packs, pack-selection order; `id` is
    /// the destination base file name
    pub path_rule_refs: Vec<FragmentRef>,
    pub warnings: Vec<String>,
}

/// Resolve a selection against a library and catalog.
///
/// Never fails: every per-entry problem is recorded in
/// [`Resolution::warnings`] and resolution continues.
pub fn resolve(selection: &Selection, library: &Library, catalog: &Catalog) -> Resolution {
    let mut warnings = Vec::new();

    let packs = load_packs(selection, library, &mut warnings);
    let pack_ids: Vec<String> = packs.iter().map(|p| p.id.clone()).collect();

    let repo_instruction_refs = pack_file_refs(&packs, "repo-instructions.md", library);
    let pack_rule_refs = pack_file_refs(&packs, "rules.md", library);
    let global_refs = global_file_refs(selection, library, &mut warnings);
    let (skill_refs, skills_index) = resolve_skills(selection, &pack_ids, library, &mut warnings);
    let path_rule_refs = resolve_path_rules(&packs, library, &mut warnings);
    let server_names = resolve_server_names(selection, &packs, catalog, &mut warnings);

    let vars = template_vars(selection);
    let document = MergedDocument {
        repo_instructions: render_section(&repo_instruction_refs, &vars),
        pack_rules: render_section(&pack_rule_refs, &vars),
        globals: render_section(&global_refs, &vars),
        skills_body: render_section(&skill_refs, &vars),
        skills_index,
        server_names,
    };

    Resolution {
        document,
        pack_ids,
        pack_rule_refs,
        path_rule_refs,
        warnings,
    }
}

fn load_packs(
    selection: &Selection,
    library: &Library,
    warnings: &mut Vec<String>,
) -> Vec<PackManifest> {
    let mut packs = Vec::new();
    for id in &selection.packs {
        match library.pack_manifest(id) {
            Some(manifest) => {
                tracing::debug!(pack = %id, "loaded pack");
                packs.push(manifest);
            }
            None => warn(warnings, format!("pack not found: {id}")),
        }
    }
    packs
}

/// Collect `packs/<id>/<name>` for each resolved pack. A pack without the
/// file simply contributes nothing; only explicit references warn.
fn pack_file_refs(packs: &[PackManifest], name: &str, library: &Library) -> Vec<FragmentRef> {
    packs
        .iter()
        .filter_map(|pack| {
            library.pack_fragment(&pack.id, name).map(|content| FragmentRef {
                id: pack.id.clone(),
                path: PathBuf::from("packs").join(&pack.id).join(name),
                content,
            })
        })
        .collect()
}

fn global_file_refs(
    selection: &Selection,
    library: &Library,
    warnings: &mut Vec<String>,
) -> Vec<FragmentRef> {
    let mut refs = Vec::new();
    for id in &selection.globals {
        match library.global_fragment(id) {
            Some(content) => refs.push(FragmentRef {
                id: id.clone(),
                path: PathBuf::from("globals").join(format!("{id}.md")),
                content,
            }),
            None => warn(warnings, format!("global not found: {id}")),
        }
    }
    refs
}

/// First-match-wins lookup over the ordered scopes (library-global skills
/// directory, then each resolved pack's skills directory). Each id loads at
/// most once; repeats in the selection are ignored silently. The index keeps
/// every distinct selected id, including unresolvable ones, so generated
/// documents can still name what was asked for.
fn resolve_skills(
    selection: &Selection,
    pack_ids: &[String],
    library: &Library,
    warnings: &mut Vec<String>,
) -> (Vec<FragmentRef>, Vec<SkillIndexEntry>) {
    let scopes = library.skill_scopes(pack_ids);
    let mut seen: Vec<&str> = Vec::new();
    let mut refs = Vec::new();
    let mut index = Vec::new();

    for id in &selection.skills {
        if seen.contains(&id.as_str()) {
            continue;
        }
        seen.push(id.as_str());

        match library
            .find_skill(&scopes, id)
            .and_then(|path| std::fs::read_to_string(&path).ok().map(|c| (path, c)))
        {
            Some((path, content)) => {
                let hint = skill_hint(&content);
                index.push(SkillIndexEntry {
                    id: id.clone(),
                    hint,
                });
                refs.push(FragmentRef {
                    id: id.clone(),
                    path,
                    content,
                });
            }
            None => {
                warn(warnings, format!("skill not found: {id}"));
                index.push(SkillIndexEntry {
                    id: id.clone(),
                    hint: None,
                });
            }
        }
    }

    (refs, index)
}

fn resolve_path_rules(
    packs: &[PackManifest],
    library: &Library,
    warnings: &mut Vec<String>,
) -> Vec<FragmentRef> {
    let mut refs = Vec::new();
    for pack in packs {
        for rule in &pack.path_rules {
            match library.pack_fragment(&pack.id, rule) {
                Some(content) => {
                    let file_name = Path::new(rule)
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| rule.clone());
                    refs.push(FragmentRef {
                        id: file_name,
                        path: PathBuf::from("packs").join(&pack.id).join(rule),
                        content,
                    });
                }
                None => warn(
                    warnings,
                    format!("path rule not found: {} (pack {})", rule, pack.id),
                ),
            }
        }
    }
    refs
}

/// Effective toolset: the explicit selection wins, else the first resolved
/// pack declaring a default, else none. The resolved list keeps unknown
/// names; renderers filter by catalog lookup where their format requires it.
fn resolve_server_names(
    selection: &Selection,
    packs: &[PackManifest],
    catalog: &Catalog,
    warnings: &mut Vec<String>,
) -> Vec<String> {
    let toolset = selection
        .mcp
        .toolset
        .clone()
        .or_else(|| packs.iter().find_map(|p| p.default_mcp_toolset.clone()));

    if let Some(name) = toolset.as_deref() {
        if catalog.find_toolset(name).is_none() {
            warn(warnings, format!("MCP toolset not in catalog: {name}"));
        }
    }

    let names = catalog.resolve_server_names(toolset.as_deref(), &selection.mcp.servers);
    for name in &names {
        if catalog.find_server(name).is_none() {
            warn(warnings, format!("MCP server not in catalog: {name}"));
        }
    }
    names
}

/// Join fragment contents with blank-line separators, trim the result, and
/// run the placeholder pass.
fn render_section(refs: &[FragmentRef], vars: &HashMap<String, String>) -> String {
    let mut joined = String::new();
    for fragment in refs {
        joined.push_str(&fragment.content);
        joined.push_str("\n\n");
    }
    template::render(joined.trim(), vars)
}

fn template_vars(selection: &Selection) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    if let Some(repo_type) = &selection.repo_type {
        vars.insert("repoType".to_string(), repo_type.clone());
    }
    vars
}

fn warn(warnings: &mut Vec<String>, message: String) {
    tracing::warn!("{message}");
    warnings.push(message);
}
