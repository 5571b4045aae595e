use chrono::{DateTime, Duration, Local};
use std::collections::VecDeque;
use tracing::info;

pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// How much history the log panel keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_entries: usize,
    pub max_age: Option<Duration>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_age: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    pub fn line(&self) -> String {
        format!("[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// The `logContainer` region: oldest entry first, scrolled to the newest.
#[derive(Debug, Clone, Default)]
pub struct LogPanel {
    entries: VecDeque<LogEntry>,
    policy: RetentionPolicy,
    scroll_top: usize,
}

impl LogPanel {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            entries: VecDeque::new(),
            policy,
            scroll_top: 0,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.push_at(Local::now(), message);
    }

    pub fn push_at(&mut self, timestamp: DateTime<Local>, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp,
            message: message.into(),
        };
        info!(target: "dashboard", "{}", entry.message);
        self.entries.push_back(entry);
        self.evict(timestamp);
        self.scroll_top = self.entries.len().saturating_sub(1);
    }

    fn evict(&mut self, now: DateTime<Local>) {
        if let Some(max_age) = self.policy.max_age {
            while let Some(oldest) = self.entries.front() {
                if now - oldest.timestamp > max_age {
                    self.entries.pop_front();
                } else {
                    break;
                }
            }
        }
        while self.entries.len() > self.policy.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Up to `rows` lines ending at the scroll position.
    pub fn window(&self, rows: usize) -> Vec<String> {
        let end = (self.scroll_top + 1).min(self.entries.len());
        let start = end.saturating_sub(rows);
        self.entries.range(start..end).map(LogEntry::line).collect()
    }

    #[cfg(test)]
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    #[cfg(test)]
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }
}
