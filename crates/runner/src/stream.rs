// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line readers for the child's output pipes.

use crate::{CompletionSignal, LineLevel, OutputSink};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

/// Read `stream` line by line into `sink`, then complete `closed`.
///
/// Invalid UTF-8 is replaced rather than failing the read. A final line
/// without a trailing newline is still delivered. Read errors end the stream.
pub(crate) fn spawn_reader<R>(
    stream: R,
    level: LineLevel,
    sink: Arc<OutputSink>,
    closed: CompletionSignal,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => sink.push(level, decode_line(&buf)),
                Err(e) => {
                    tracing::debug!(%level, error = %e, "output stream read failed");
                    break;
                }
            }
        }
        closed.complete();
    })
}

fn decode_line(buf: &[u8]) -> String {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
