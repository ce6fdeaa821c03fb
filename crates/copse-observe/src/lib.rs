//! Mutation observability for copse trees.
//!
//! Trees report each completed structural mutation as a [`TreeEvent`] to
//! an injected [`TreeObserver`]. Observers are diagnostics only:
//! correctness never depends on them, and the default [`NullObserver`]
//! drops everything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
        }
    }
}

/// Which operation produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutation {
    Insert,
    Erase,
    Clear,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Insert => write!(f, "insert"),
            Mutation::Erase => write!(f, "erase"),
            Mutation::Clear => write!(f, "clear"),
        }
    }
}

/// What the operation did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Inserted,
    DuplicateIgnored,
    Removed,
    Missing,
    Cleared,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Inserted => write!(f, "inserted"),
            Outcome::DuplicateIgnored => write!(f, "duplicate ignored"),
            Outcome::Removed => write!(f, "removed"),
            Outcome::Missing => write!(f, "missing"),
            Outcome::Cleared => write!(f, "cleared"),
        }
    }
}

/// A structured record of one completed mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEvent {
    pub mutation: Mutation,
    pub severity: Severity,
    /// Rendered key, when the mutation names one.
    pub key: Option<String>,
    pub outcome: Outcome,
    pub at: DateTime<Utc>,
}

impl TreeEvent {
    fn new(mutation: Mutation, severity: Severity, key: Option<String>, outcome: Outcome) -> Self {
        Self {
            mutation,
            severity,
            key,
            outcome,
            at: Utc::now(),
        }
    }

    /// A key was added to the tree.
    pub fn inserted(key: impl Into<String>) -> Self {
        Self::new(
            Mutation::Insert,
            Severity::Info,
            Some(key.into()),
            Outcome::Inserted,
        )
    }

    /// An insert found the key already present and left the tree alone.
    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::new(
            Mutation::Insert,
            Severity::Info,
            Some(key.into()),
            Outcome::DuplicateIgnored,
        )
    }

    /// A key was removed from the tree.
    pub fn removed(key: impl Into<String>) -> Self {
        Self::new(
            Mutation::Erase,
            Severity::Info,
            Some(key.into()),
            Outcome::Removed,
        )
    }

    /// An erase named a key the tree does not hold.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::new(
            Mutation::Erase,
            Severity::Warn,
            Some(key.into()),
            Outcome::Missing,
        )
    }

    /// The tree was cleared; warns when live nodes were dropped.
    pub fn cleared(dropped: usize) -> Self {
        let severity = if dropped > 0 {
            Severity::Warn
        } else {
            Severity::Info
        };
        Self::new(Mutation::Clear, severity, None, Outcome::Cleared)
    }
}

impl fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.mutation)?;
        if let Some(key) = &self.key {
            write!(f, " key={key}")?;
        }
        write!(f, ": {}", self.outcome)
    }
}

/// Sink for tree mutation events.
pub trait TreeObserver: Send + Sync {
    fn on_event(&self, event: &TreeEvent);
}

/// Default observer: drops every event.
pub struct NullObserver;

impl TreeObserver for NullObserver {
    fn on_event(&self, _event: &TreeEvent) {}
}

/// Writes one line per event to stdout.
pub struct ConsoleObserver;

impl TreeObserver for ConsoleObserver {
    fn on_event(&self, event: &TreeEvent) {
        println!("{event}");
    }
}

/// Buffers events for later inspection, for tests and diagnostics.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TreeEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<TreeEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl TreeObserver for RecordingObserver {
    fn on_event(&self, event: &TreeEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
