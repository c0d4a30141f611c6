use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reserved choice key meaning the user dismissed a dialog.
pub const CANCEL_KEY: &str = "cancel";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    System,
    Status,
    Fix,
    Browsers,
    Multimedia,
    Graphics,
    Tools,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::System,
        Category::Status,
        Category::Fix,
        Category::Browsers,
        Category::Multimedia,
        Category::Graphics,
        Category::Tools,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::System => "system",
            Category::Status => "status",
            Category::Fix => "fix",
            Category::Browsers => "browsers",
            Category::Multimedia => "multimedia",
            Category::Graphics => "graphics",
            Category::Tools => "tools",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One runnable command of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandEntry {
    pub category: Category,
    pub key: &'static str,
    pub label: &'static str,
    pub template: &'static str,
}

/// Dialog texts shown when a category is offered as a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub heading: &'static str,
    pub prompt: &'static str,
    pub cancel_message: &'static str,
}

/// Result of resolving a (category, key) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found(&'static CommandEntry),
    Cancelled,
}

/// Settings the dispatcher runs with, built from CLI flags and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub terminals: Vec<String>,
    pub hold_prompt: String,
    pub config_path: Option<PathBuf>,
}

/// What happened to a single launch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched { terminal: PathBuf },
    TerminalUnavailable,
    SpawnFailed { error: String },
}

/// What happened to a user selection after lookup and dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Launched,
    Cancelled,
    Failed,
}
