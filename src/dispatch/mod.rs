//! Launches catalogue commands in an external terminal emulator.
//!
//! Launching is fire-and-forget: the terminal process is detached, its exit
//! status is never observed, and failures are reported only through the log.

mod terminal;

pub use terminal::{PathResolver, TerminalResolver};

use crate::log_sink::LogSink;
use crate::model::{DispatchConfig, LaunchOutcome};
use std::path::Path;
use std::process::{Command, Stdio};

pub const DEFAULT_TERMINALS: [&str; 2] = ["x-terminal-emulator", "gnome-terminal"];
pub const DEFAULT_HOLD_PROMPT: &str = "Press Enter to close this window...";

/// Starts a program without waiting for it.
pub trait ProcessSpawner {
    fn spawn(&self, program: &Path, args: &[String]) -> std::io::Result<()>;
}

/// Spawns real, detached OS processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, program: &Path, args: &[String]) -> std::io::Result<()> {
        // The child handle is dropped on purpose; the terminal outlives this call.
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::info!(pid = child.id(), program = %program.display(), "terminal started");
        Ok(())
    }
}

/// Shell fragment that keeps the terminal open until Enter is pressed.
pub fn hold_suffix(prompt: &str) -> String {
    let quoted = prompt.replace('\'', r"'\''");
    format!("; echo; echo '{quoted}'; read _")
}

/// Arguments passed to the terminal emulator for `full_command`.
pub fn terminal_args(full_command: &str) -> Vec<String> {
    vec![
        "-e".to_string(),
        "bash".to_string(),
        "-lc".to_string(),
        full_command.to_string(),
    ]
}

pub struct Dispatcher<R, S> {
    resolver: R,
    spawner: S,
    hold_prompt: String,
}

impl Dispatcher<PathResolver, SystemSpawner> {
    pub fn from_config(cfg: &DispatchConfig) -> Self {
        Self::new(
            PathResolver::new(cfg.terminals.clone()),
            SystemSpawner,
            cfg.hold_prompt.clone(),
        )
    }
}

impl<R: TerminalResolver, S: ProcessSpawner> Dispatcher<R, S> {
    pub fn new(resolver: R, spawner: S, hold_prompt: impl Into<String>) -> Self {
        Self {
            resolver,
            spawner,
            hold_prompt: hold_prompt.into(),
        }
    }

    /// Run `command` interactively in a terminal window and log what happened.
    pub fn launch(&self, command: &str, log: &mut LogSink) -> LaunchOutcome {
        let Some(terminal) = self.resolver.resolve() else {
            log.append(format!(
                "Error: no terminal emulator found ({}).",
                self.resolver.describe()
            ));
            return LaunchOutcome::TerminalUnavailable;
        };

        log.append(format!("Running command in terminal:\n  {command}"));
        let full = format!("{command}{}", hold_suffix(&self.hold_prompt));
        match self.spawner.spawn(&terminal, &terminal_args(&full)) {
            Ok(()) => LaunchOutcome::Launched { terminal },
            Err(e) => {
                tracing::warn!(error = %e, terminal = %terminal.display(), "spawn failed");
                log.append(format!("Error starting command: {e}"));
                LaunchOutcome::SpawnFailed {
                    error: e.to_string(),
                }
            }
        }
    }
}
