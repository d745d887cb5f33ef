//! Append-only audit log of evaluation decisions

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Error,
}

/// A single human-readable decision record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            LogLevel::Info => f.write_str(&self.message),
            LogLevel::Error => write!(f, "Error: {}", self.message),
        }
    }
}

/// Append-only sink of decision records
///
/// The log is owned by the caller. The evaluator appends to whatever log it is
/// handed and never clears it, so passing the same log to several passes
/// accumulates their records. Every append is also emitted as a `tracing`
/// event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationLog {
    records: Vec<LogRecord>,
}

impl EvaluationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an informational decision record
    pub fn info(&mut self, message: impl Into<String>) {
        let record = LogRecord {
            level: LogLevel::Info,
            message: message.into(),
        };
        info!(record = %record, "Policy decision");
        self.records.push(record);
    }

    /// Append an error record
    pub fn error(&mut self, message: impl Into<String>) {
        let record = LogRecord {
            level: LogLevel::Error,
            message: message.into(),
        };
        warn!(record = %record, "Evaluation error");
        self.records.push(record);
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any rendered record contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.records
            .iter()
            .any(|record| record.to_string().contains(needle))
    }
}

impl fmt::Display for EvaluationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a EvaluationLog {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
