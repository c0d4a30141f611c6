mod catalogue;
mod cli;
mod config;
mod dispatch;
mod log_sink;
mod model;
mod orchestrator;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// TUI mode logs to a file so diagnostics never draw over the screen;
/// everything else logs to stderr.
fn init_tracing(to_file: bool) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if to_file {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("debian-tools-box");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create log directory {}", dir.display()))?;
        let file_appender = tracing_appender::rolling::never(&dir, "session.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .init();
        return Ok(Some(guard));
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(None)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_tui = args.wants_tui();
    let _guard = init_tracing(is_tui)?;

    match cli::run(args).await {
        Ok(()) => {
            // Don't wait on lingering blocking tasks such as the stdin prompt.
            if !is_tui {
                std::process::exit(0);
            }
            Ok(())
        }
        Err(e) => {
            if is_tui {
                tracing::error!("{e:#}");
                Err(e)
            } else {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}
