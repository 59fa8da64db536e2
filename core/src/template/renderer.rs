use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::grid::Row;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder regex"))
}

/// Render a template against one row. A single literal pass: each
/// `{{variable}}` is replaced by the row's cell text; missing variables and
/// empty cells render as the empty string.
pub fn render(template: &str, row: &Row) -> String {
    placeholder_re()
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let variable = caps[1].trim();
            row.get(variable).map(cell_text).unwrap_or_default()
        })
        .into_owned()
}

/// Unique placeholder names in first-appearance order.
pub fn variables(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in placeholder_re().captures_iter(template) {
        let name = caps[1].trim().to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
