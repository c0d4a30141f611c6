//! Selection handling shared by the CLI and the TUI.
//!
//! Turns a (category, choice key) selection into either a logged cancellation
//! or a terminal launch, and offers the reusable choose-one step used by every
//! category dialog.

mod chooser;
mod controller;

pub(crate) use chooser::choose_one;
pub(crate) use controller::dispatch_selection;
