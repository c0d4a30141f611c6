//! Text and JSON listings of the catalogue for CLI output.

use crate::catalogue;
use crate::model::{Category, CommandEntry};
use anyhow::{Context, Result};

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

fn selected(filter: Option<Category>) -> Vec<Category> {
    match filter {
        Some(c) => vec![c],
        None => Category::ALL.to_vec(),
    }
}

/// One block per category: heading, then `key  label` rows.
pub(crate) fn build_text_summary(filter: Option<Category>, verbose: bool) -> TextSummary {
    let mut lines = Vec::new();
    for (i, category) in selected(filter).into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let info = catalogue::info(category);
        lines.push(format!("{category} ({})", info.heading));
        let entries: Vec<&CommandEntry> = catalogue::entries(category).collect();
        let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
        for e in entries {
            lines.push(format!("  {:<width$}  {}", e.key, e.label));
            if verbose {
                lines.push(format!("  {:<width$}  $ {}", "", e.template));
            }
        }
    }
    TextSummary { lines }
}

/// Pretty JSON array of entries.
pub(crate) fn build_json_summary(filter: Option<Category>) -> Result<String> {
    let entries: Vec<&CommandEntry> = match filter {
        Some(c) => catalogue::entries(c).collect(),
        None => catalogue::all().iter().collect(),
    };
    serde_json::to_string_pretty(&entries).context("serialize catalogue")
}
