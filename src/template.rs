//! Minimal placeholder rendering: replaces `{{key}}` tokens with values from
//! a map. Unknown keys are left untouched so fragments stay readable even
//! when a variable is not set for the current repository.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern"))
}

/// Render `{{key}}` placeholders from `vars`.
pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
    placeholder_re()
        .replace_all(template, |caps: &Captures| {
            vars.get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
