// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Captured output lines.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a captured line: `Info` for stdout, `Error` for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineLevel {
    Info,
    Error,
}

crate::simple_display! {
    LineLevel {
        Info => "Info",
        Error => "Error",
    }
}

impl LineLevel {
    pub fn is_error(self) -> bool {
        matches!(self, LineLevel::Error)
    }
}

/// One line of process output, stamped when the stream delivered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    timestamp: DateTime<Utc>,
    level: LineLevel,
    text: String,
}

impl LineRecord {
    /// Record a line received now.
    pub fn new(level: LineLevel, text: impl Into<String>) -> Self {
        Self::at(Utc::now(), level, text)
    }

    pub fn at(timestamp: DateTime<Utc>, level: LineLevel, text: impl Into<String>) -> Self {
        Self { timestamp, level, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LineLevel::Info, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LineLevel::Error, text)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn local_timestamp(&self) -> DateTime<Local> {
        self.timestamp.with_timezone(&Local)
    }

    pub fn level(&self) -> LineLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// `[HH:MM:SS] [Level] text`, in local time.
impl fmt::Display for LineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}] {}", self.local_timestamp().format("%H:%M:%S"), self.level, self.text)
    }
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;
