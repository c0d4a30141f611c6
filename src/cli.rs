use crate::catalogue;
use crate::dispatch::{Dispatcher, DEFAULT_HOLD_PROMPT, DEFAULT_TERMINALS};
use crate::log_sink::LogSink;
use crate::model::{Category, DispatchConfig, Lookup, SelectionOutcome};
use crate::orchestrator;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use tokio::sync::mpsc;

/// Stdout lives on a blocking task; subcommands only push lines into the channel.
fn spawn_output_writer() -> (mpsc::UnboundedSender<String>, tokio::task::JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let handle = tokio::task::spawn_blocking(move || {
        let mut out = std::io::LineWriter::new(std::io::stdout().lock());
        while let Some(text) = rx.blocking_recv() {
            if writeln!(out, "{text}").is_err() {
                // Reader went away (e.g. piped into `head`).
                break;
            }
        }
        let _ = out.flush();
    });
    (tx, handle)
}

/// Send every line, then wait until the writer has flushed them.
async fn print_lines(lines: impl IntoIterator<Item = String>) {
    let (tx, handle) = spawn_output_writer();
    for line in lines {
        let _ = tx.send(line);
    }
    drop(tx);
    let _ = handle.await;
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "debian-tools-box",
    version,
    about = "Launch common Debian maintenance commands in a terminal window"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Terminal emulator to probe, in order (repeatable; replaces the default list)
    #[arg(long = "terminal", global = true, value_name = "NAME")]
    pub terminals: Vec<String>,

    /// Text printed before the terminal window waits for Enter
    #[arg(long, global = true)]
    pub hold_prompt: Option<String>,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List catalogue entries
    List {
        /// Only list this category
        category: Option<Category>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also print each command line
        #[arg(long, short)]
        verbose: bool,
    },
    /// Print the command line of one entry
    Show { category: Category, key: String },
    /// Launch an entry in a terminal; prompts for the choice when KEY is omitted
    Run {
        category: Category,
        key: Option<String>,
    },
}

impl Cli {
    /// Whether this invocation starts the interactive TUI.
    pub fn wants_tui(&self) -> bool {
        self.command.is_none() && cfg!(feature = "tui")
    }
}

pub async fn run(args: Cli) -> Result<()> {
    // Only the TUI and `run` read dispatcher settings, so only they load the config file.
    match args.command.clone() {
        None => {
            #[cfg(feature = "tui")]
            {
                return crate::tui::run(build_config(&args)?).await;
            }
            #[cfg(not(feature = "tui"))]
            {
                return run_list(None, false, false).await;
            }
        }
        Some(Command::List {
            category,
            json,
            verbose,
        }) => run_list(category, json, verbose).await,
        Some(Command::Show { category, key }) => run_show(category, &key).await,
        Some(Command::Run { category, key }) => {
            let cfg = build_config(&args)?;
            run_selection(&cfg, category, key).await
        }
    }
}

/// Build a `DispatchConfig` from CLI arguments layered over the config file.
pub fn build_config(args: &Cli) -> Result<DispatchConfig> {
    let (file, config_path) = crate::config::load(args.config.as_deref())?;

    let terminals = if !args.terminals.is_empty() {
        args.terminals.clone()
    } else if let Some(t) = file.terminals.filter(|t| !t.is_empty()) {
        t
    } else {
        DEFAULT_TERMINALS.iter().map(|s| s.to_string()).collect()
    };

    let hold_prompt = args
        .hold_prompt
        .clone()
        .or(file.hold_prompt)
        .unwrap_or_else(|| DEFAULT_HOLD_PROMPT.to_string());

    Ok(DispatchConfig {
        terminals,
        hold_prompt,
        config_path,
    })
}

async fn run_list(category: Option<Category>, json: bool, verbose: bool) -> Result<()> {
    let lines = if json {
        vec![crate::text_summary::build_json_summary(category)?]
    } else {
        crate::text_summary::build_text_summary(category, verbose).lines
    };
    print_lines(lines).await;
    Ok(())
}

async fn run_show(category: Category, key: &str) -> Result<()> {
    match catalogue::lookup(category, key) {
        Lookup::Found(entry) => {
            print_lines([entry.template.to_string()]).await;
            Ok(())
        }
        Lookup::Cancelled => Err(unknown_key(category, key)),
    }
}

fn unknown_key(category: Category, key: &str) -> anyhow::Error {
    let valid: Vec<&str> = catalogue::entries(category).map(|e| e.key).collect();
    anyhow::anyhow!(
        "no entry '{key}' in {category} (choices: {})",
        valid.join(", ")
    )
}

async fn run_selection(cfg: &DispatchConfig, category: Category, key: Option<String>) -> Result<()> {
    let key = match key {
        Some(k) => k,
        None => tokio::task::spawn_blocking(move || prompt_choice(category))
            .await
            .context("choice prompt task failed")??,
    };

    let dispatcher = Dispatcher::from_config(cfg);
    let mut log = LogSink::new();
    let outcome = orchestrator::dispatch_selection(category, &key, &dispatcher, &mut log);

    print_lines(log.render()).await;

    match outcome {
        SelectionOutcome::Launched | SelectionOutcome::Cancelled => Ok(()),
        SelectionOutcome::Failed => Err(anyhow::anyhow!("could not launch {category}/{key}")),
    }
}

/// Numbered menu on stderr, answer read from stdin.
fn prompt_choice(category: Category) -> Result<String> {
    let info = catalogue::info(category);
    let options = catalogue::choices(category);

    let mut err = std::io::stderr().lock();
    writeln!(err, "{}", info.heading)?;
    writeln!(err, "{}", info.prompt)?;
    for (i, (_, label)) in options.iter().enumerate() {
        writeln!(err, "  {}) {}", i + 1, label)?;
    }
    write!(err, "> ")?;
    err.flush()?;

    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("read choice from stdin")?;

    let response = parse_response(&options, &input);
    Ok(orchestrator::choose_one(&options, response).to_string())
}

/// Accepts a 1-based number or a choice key; anything else dismisses.
fn parse_response(options: &[(&str, &str)], input: &str) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        return None;
    }
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1);
    }
    options.iter().position(|(key, _)| *key == input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Cli {
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_without_flags_or_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();
        let args = parse(&["debian-tools-box", "--config", path.to_str().unwrap()]);

        let cfg = build_config(&args).unwrap();
        assert_eq!(cfg.terminals, vec!["x-terminal-emulator", "gnome-terminal"]);
        assert_eq!(cfg.hold_prompt, DEFAULT_HOLD_PROMPT);
        assert_eq!(cfg.config_path, Some(path));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "terminals": ["xterm"], "hold_prompt": "from file" }"#,
        )
        .unwrap();

        let from_file = build_config(&parse(&[
            "debian-tools-box",
            "--config",
            path.to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(from_file.terminals, vec!["xterm"]);
        assert_eq!(from_file.hold_prompt, "from file");

        let overridden = build_config(&parse(&[
            "debian-tools-box",
            "--config",
            path.to_str().unwrap(),
            "--terminal",
            "kitty",
            "--terminal",
            "foot",
            "--hold-prompt",
            "from flag",
        ]))
        .unwrap();
        assert_eq!(overridden.terminals, vec!["kitty", "foot"]);
        assert_eq!(overridden.hold_prompt, "from flag");
    }

    #[test]
    fn subcommands_parse_categories() {
        let args = parse(&["debian-tools-box", "run", "multimedia", "codecs"]);
        assert!(!args.wants_tui());
        match &args.command {
            Some(Command::Run { category, key }) => {
                assert_eq!(*category, Category::Multimedia);
                assert_eq!(key.as_deref(), Some("codecs"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(Cli::try_parse_from(["debian-tools-box", "run", "games"]).is_err());
    }

    #[test]
    fn prompt_accepts_numbers_and_keys() {
        let options = catalogue::choices(Category::Browsers);
        assert_eq!(parse_response(&options, "1\n"), Some(0));
        assert_eq!(parse_response(&options, "chromium"), Some(1));
        assert_eq!(parse_response(&options, ""), None);
        assert_eq!(parse_response(&options, "q"), None);
        assert_eq!(parse_response(&options, "0"), None);
        assert_eq!(parse_response(&options, "opera"), None);
        assert_eq!(
            orchestrator::choose_one(&options, parse_response(&options, "9")),
            "cancel"
        );
    }

    #[test]
    fn unknown_key_error_lists_choices() {
        let err = unknown_key(Category::Graphics, "krita");
        let msg = err.to_string();
        assert!(msg.contains("krita"));
        assert!(msg.contains("gimp, gthumb, flameshot"));
    }
}
