// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-safe accumulator for captured output lines.

use crate::config::LineCallback;
use crate::{LineLevel, LineRecord};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Collects the lines of one run.
///
/// Appended to concurrently by the stdout and stderr readers and read once
/// when the result is assembled. Lines from one stream keep their arrival
/// order; interleaving across streams follows delivery order only.
pub struct OutputSink {
    lines: Mutex<Vec<LineRecord>>,
    on_line: Option<LineCallback>,
}

impl OutputSink {
    pub fn new(on_line: Option<LineCallback>) -> Self {
        Self { lines: Mutex::new(Vec::new()), on_line }
    }

    /// Record a line received now and forward it to the line observer.
    ///
    /// A panicking observer is logged; the line is kept either way.
    pub fn push(&self, level: LineLevel, text: impl Into<String>) {
        let line = LineRecord::new(level, text);
        match level {
            LineLevel::Info => tracing::trace!(target: "outrun::output", "{}", line.text()),
            LineLevel::Error => tracing::trace!(target: "outrun::output", stderr = true, "{}", line.text()),
        }

        self.lines.lock().push(line.clone());

        if let Some(on_line) = &self.on_line {
            if catch_unwind(AssertUnwindSafe(|| on_line(&line))).is_err() {
                tracing::warn!("line callback panicked");
            }
        }
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(LineLevel::Info, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(LineLevel::Error, text);
    }

    /// Copy of every line captured so far.
    pub fn snapshot(&self) -> Vec<LineRecord> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
