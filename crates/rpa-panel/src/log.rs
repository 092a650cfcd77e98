//! Newest-first interaction log.

use std::collections::VecDeque;

use chrono::{Local, NaiveTime};
use rpa_common::PanelError;

/// The log clears itself at this many events when auto-clear is on.
pub const AUTO_CLEAR_THRESHOLD: u64 = 100;

/// File name used for log exports.
pub const LOG_EXPORT_FILE: &str = "event-log.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub time: NaiveTime,
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.time.format("%H:%M:%S"), self.message)
    }
}

/// What happened when an entry was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    Appended,
    /// The entry reached the auto-clear threshold and the log was emptied.
    AutoCleared,
}

#[derive(Debug, Default)]
pub struct EventLog {
    /// Newest first.
    entries: VecDeque<LogEntry>,
    event_count: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `message` stamped with the local wall-clock time.
    pub fn log(&mut self, message: impl Into<String>, auto_clear: bool) -> LogOutcome {
        self.log_at(Local::now().time(), message, auto_clear)
    }

    pub fn log_at(
        &mut self,
        time: NaiveTime,
        message: impl Into<String>,
        auto_clear: bool,
    ) -> LogOutcome {
        self.entries.push_front(LogEntry {
            time,
            message: message.into(),
        });
        self.event_count += 1;

        if auto_clear && self.event_count >= AUTO_CLEAR_THRESHOLD {
            self.clear();
            return LogOutcome::AutoCleared;
        }
        LogOutcome::Appended
    }

    /// Drop every entry and reset the event counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.event_count = 0;
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Events logged since the last clear.
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text export, one entry per line, newest first.
    pub fn export_text(&self) -> Result<String, PanelError> {
        if self.entries.is_empty() {
            return Err(PanelError::NothingToExport);
        }
        Ok(self
            .entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
