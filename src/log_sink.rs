//! Append-only session log shown to the user.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use time::{macros::format_description, OffsetDateTime};

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub seq: u64,
    pub at: OffsetDateTime,
    pub text: String,
}

impl LogEntry {
    pub fn clock(&self) -> String {
        self.at
            .format(format_description!("[hour]:[minute]:[second]"))
            .unwrap_or_else(|_| "--:--:--".into())
    }
}

/// Entries are kept in call order for the whole process lifetime.
#[derive(Debug, Default)]
pub struct LogSink {
    entries: Vec<LogEntry>,
    next_seq: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>) {
        let entry = LogEntry {
            seq: self.next_seq,
            at: OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
            text: text.into(),
        };
        tracing::debug!(seq = entry.seq, "{}", entry.text);
        self.entries.push(entry);
        self.next_seq += 1;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Display lines, one per text line, the first of each entry stamped with its clock.
    pub fn render(&self) -> Vec<String> {
        let mut out = Vec::new();
        for entry in self.entries() {
            let clock = entry.clock();
            let mut lines = entry.text.lines();
            let first = lines.next().unwrap_or("");
            out.push(format!("[{clock}] {first}"));
            for line in lines {
                out.push(format!("           {line}"));
            }
        }
        out
    }

    /// Write the rendered log to `path` as plain text.
    pub fn export(&self, path: &Path) -> Result<()> {
        let mut f = std::fs::File::create(path)
            .with_context(|| format!("create log export {}", path.display()))?;
        for line in self.render() {
            writeln!(f, "{line}").context("write log export")?;
        }
        Ok(())
    }
}
