use crate::log_sink::LogSink;
use anyhow::{Context, Result};
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;
use time::{macros::format_description, OffsetDateTime};

static CLIPBOARD: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

/// File name for a log export taken at `at`.
pub fn log_file_name(at: OffsetDateTime) -> String {
    let stamp = at
        .format(format_description!(
            "[year][month][day]-[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "session".into());
    format!("debian-tools-box-log-{stamp}.txt")
}

/// Write the session log into the current directory.
/// Returns the absolute path of the exported file.
pub fn export_log(log: &LogSink) -> Result<std::path::PathBuf> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let current_dir = std::env::current_dir().context("get current directory")?;
    let path = current_dir.join(log_file_name(now));
    log.export(&path)?;
    Ok(path)
}

/// X11 and Wayland serve the selection from the owning process; keep it alive this long.
const CLIPBOARD_HOLD: Duration = Duration::from_secs(2);

fn clipboard_owner(rx: std_mpsc::Receiver<String>) {
    for text in rx {
        let result = arboard::Clipboard::new().and_then(|mut c| {
            c.set_text(text)?;
            std::thread::sleep(CLIPBOARD_HOLD);
            Ok(())
        });
        if let Err(e) = result {
            tracing::warn!(error = %e, "clipboard copy failed");
        }
    }
}

/// Hand `text` to the clipboard owner thread, starting it on first use.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    CLIPBOARD
        .get_or_init(|| {
            let (tx, rx) = std_mpsc::channel();
            std::thread::spawn(move || clipboard_owner(rx));
            tx
        })
        .send(text.to_owned())
        .context("clipboard thread stopped")
}
