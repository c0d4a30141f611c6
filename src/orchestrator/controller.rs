//! Selection controller.
//!
//! Catalogue lookup followed by dispatch; cancellations only touch the log.

use crate::catalogue;
use crate::dispatch::{Dispatcher, ProcessSpawner, TerminalResolver};
use crate::log_sink::LogSink;
use crate::model::{Category, LaunchOutcome, Lookup, SelectionOutcome};

/// Resolve `key` within `category` and launch it, or log the cancellation.
pub(crate) fn dispatch_selection<R, S>(
    category: Category,
    key: &str,
    dispatcher: &Dispatcher<R, S>,
    log: &mut LogSink,
) -> SelectionOutcome
where
    R: TerminalResolver,
    S: ProcessSpawner,
{
    match catalogue::lookup(category, key) {
        Lookup::Found(entry) => {
            match dispatcher.launch(entry.template, log) {
                LaunchOutcome::Launched { terminal } => {
                    tracing::info!(%category, key = entry.key, terminal = %terminal.display(), "launched");
                    SelectionOutcome::Launched
                }
                LaunchOutcome::TerminalUnavailable => SelectionOutcome::Failed,
                LaunchOutcome::SpawnFailed { error } => {
                    tracing::error!(%category, key = entry.key, %error, "launch failed");
                    SelectionOutcome::Failed
                }
            }
        }
        Lookup::Cancelled => {
            if key != crate::model::CANCEL_KEY {
                tracing::warn!(%category, key, "unknown choice key, treating as cancel");
            }
            log.append(catalogue::info(category).cancel_message);
            SelectionOutcome::Cancelled
        }
    }
}
