//! Streaming reveal: progressive raw prefixes, then one formatted commit.
//!
//! [`stream_reply`] drives the illusion of a streaming assistant. Each
//! tick appends a fixed-size run of Unicode scalar values to an
//! accumulated buffer and writes the buffer to the sink, so the sink
//! observes a strictly growing prefix of the reply. Once the whole text
//! has been revealed, the formatter runs once over the full original
//! text and the result is committed with a single `set_formatted` call.
//!
//! Ticks are sequential on the tokio timer; suspension happens only
//! between ticks. Cancellation is observed between ticks and is
//! idempotent: a cancelled or completed stream ignores further cancels.

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::format::{self, FormattedBlock};

/// A write failure reported by a [`DisplaySink`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SinkError(pub String);

/// Failures surfaced by [`stream_reply`].
///
/// Cancellation is not an error; it is reported through
/// [`StreamOutcome::Cancelled`].
#[derive(Debug, Error)]
pub enum StreamError {
    /// A sink write failed; remaining ticks were abandoned, no retry.
    #[error("sink write failed: {0}")]
    SinkWrite(#[from] SinkError),
}

/// The display surface the reveal writes into.
///
/// Implementations must not block: writes are fire-and-forget from the
/// stream's perspective.
pub trait DisplaySink {
    /// Fast path during streaming: the raw, unformatted prefix so far.
    fn set_raw_text(&mut self, text: &str) -> Result<(), SinkError>;

    /// Terminal commit: the formatted rendering of the complete text.
    fn set_formatted(&mut self, blocks: Vec<FormattedBlock>) -> Result<(), SinkError>;
}

/// Reveal pacing options.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Unicode scalar values revealed per tick (minimum 1).
    pub chunk_size: usize,
    /// Delay between ticks.
    pub interval: Duration,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            chunk_size: 2,
            interval: Duration::from_millis(12),
        }
    }
}

/// How a reveal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// All text was revealed and the formatted commit landed.
    Completed,
    /// Cancellation was observed first; no further sink writes happened.
    Cancelled,
}

/// Transient cursor over the text being revealed.
///
/// Offsets are in Unicode scalar values so multi-byte characters are
/// never split mid-codepoint. Discarded when the reveal ends.
struct StreamCursor {
    chars: Vec<char>,
    offset: usize,
    chunk_size: usize,
}

impl StreamCursor {
    fn new(text: &str, chunk_size: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            offset: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Appends the next chunk to `buffer`; returns whether text remains.
    fn push_next_chunk(&mut self, buffer: &mut String) -> bool {
        let end = (self.offset + self.chunk_size).min(self.chars.len());
        buffer.extend(&self.chars[self.offset..end]);
        self.offset = end;
        self.offset < self.chars.len()
    }
}

/// Reveals `text` into `sink` chunk by chunk, then commits the
/// formatted rendering of the full original text.
///
/// Empty text is a no-op: the caller is expected to skip empty
/// submissions, and no sink write happens for them.
///
/// # Errors
/// Propagates the first [`SinkError`] and stops ticking.
pub async fn stream_reply<S: DisplaySink>(
    text: &str,
    sink: &mut S,
    options: &StreamOptions,
    cancel: &CancellationToken,
) -> Result<StreamOutcome, StreamError> {
    if text.is_empty() {
        return Ok(StreamOutcome::Completed);
    }

    let mut cursor = StreamCursor::new(text, options.chunk_size);
    let mut buffer = String::with_capacity(text.len());

    loop {
        if cancel.is_cancelled() {
            tracing::debug!(revealed = cursor.offset, "stream cancelled");
            return Ok(StreamOutcome::Cancelled);
        }

        let more = cursor.push_next_chunk(&mut buffer);
        sink.set_raw_text(&buffer)?;
        if !more {
            break;
        }

        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!(revealed = cursor.offset, "stream cancelled");
                return Ok(StreamOutcome::Cancelled);
            }
            () = tokio::time::sleep(options.interval) => {}
        }
    }

    // Format the full original text, not the accumulated buffer, so the
    // commit can never carry truncation artifacts.
    sink.set_formatted(format::format(text))?;
    tracing::debug!(chars = cursor.chars.len(), "stream completed");
    Ok(StreamOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format;

    #[derive(Default)]
    struct RecordingSink {
        raw: Vec<String>,
        formatted: Vec<Vec<FormattedBlock>>,
    }

    impl DisplaySink for RecordingSink {
        fn set_raw_text(&mut self, text: &str) -> Result<(), SinkError> {
            self.raw.push(text.to_string());
            Ok(())
        }

        fn set_formatted(&mut self, blocks: Vec<FormattedBlock>) -> Result<(), SinkError> {
            self.formatted.push(blocks);
            Ok(())
        }
    }

    /// Fails every raw write after the first `ok_writes`.
    struct FailingSink {
        ok_writes: usize,
        raw_calls: usize,
        formatted_calls: usize,
    }

    impl DisplaySink for FailingSink {
        fn set_raw_text(&mut self, _text: &str) -> Result<(), SinkError> {
            self.raw_calls += 1;
            if self.raw_calls > self.ok_writes {
                return Err(SinkError("display torn down".to_string()));
            }
            Ok(())
        }

        fn set_formatted(&mut self, _blocks: Vec<FormattedBlock>) -> Result<(), SinkError> {
            self.formatted_calls += 1;
            Ok(())
        }
    }

    fn options(chunk_size: usize) -> StreamOptions {
        StreamOptions {
            chunk_size,
            interval: Duration::from_millis(12),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_raw_writes_are_growing_prefixes_then_one_commit() {
        let text = "abcde";
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        let outcome = stream_reply(text, &mut sink, &options(2), &cancel)
            .await
            .unwrap();

        assert_eq!(outcome, StreamOutcome::Completed);
        assert_eq!(sink.raw, vec!["ab", "abcd", "abcde"]);
        assert_eq!(sink.formatted, vec![format(text)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chunking_counts_scalars_not_bytes() {
        let text = "héllo ☃ wörld";
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        stream_reply(text, &mut sink, &options(3), &cancel)
            .await
            .unwrap();

        let mut last_len = 0;
        for raw in &sink.raw {
            assert!(text.starts_with(raw.as_str()), "not a prefix: {raw:?}");
            let len = raw.chars().count();
            assert!(len > last_len, "prefix did not grow: {raw:?}");
            last_len = len;
        }
        assert_eq!(sink.raw.last().map(String::as_str), Some(text));
    }

    #[tokio::test(start_paused = true)]
    async fn test_chunk_size_zero_is_clamped() {
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        stream_reply("ab", &mut sink, &options(0), &cancel)
            .await
            .unwrap();

        assert_eq!(sink.raw, vec!["a", "ab"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_writes_nothing() {
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        let outcome = stream_reply("", &mut sink, &options(2), &cancel)
            .await
            .unwrap();

        assert_eq!(outcome, StreamOutcome::Completed);
        assert!(sink.raw.is_empty());
        assert!(sink.formatted.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_stream_stops_all_writes() {
        let text = "0123456789";
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        let opts = options(1);
        let stream = stream_reply(text, &mut sink, &opts, &cancel);
        let canceller = async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            trigger.cancel();
        };
        let (outcome, ()) = tokio::join!(stream, canceller);

        assert_eq!(outcome.unwrap(), StreamOutcome::Cancelled);
        // Ticks at 0ms, 12ms and 24ms land before the 30ms cancel.
        assert_eq!(sink.raw.len(), 3);
        assert!(sink.formatted.is_empty());

        // Cancelling again is a no-op.
        cancel.cancel();
        assert!(sink.formatted.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_start_writes_nothing() {
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = stream_reply("abc", &mut sink, &options(1), &cancel)
            .await
            .unwrap();

        assert_eq!(outcome, StreamOutcome::Cancelled);
        assert!(sink.raw.is_empty());
        assert!(sink.formatted.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_failure_aborts_remaining_ticks() {
        let mut sink = FailingSink {
            ok_writes: 2,
            raw_calls: 0,
            formatted_calls: 0,
        };
        let cancel = CancellationToken::new();

        let result = stream_reply("abcdefgh", &mut sink, &options(1), &cancel).await;

        assert!(matches!(result, Err(StreamError::SinkWrite(_))));
        assert_eq!(sink.raw_calls, 3);
        assert_eq!(sink.formatted_calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_carries_full_formatted_text() {
        let text = "Intro\n\n```rs\nlet x = 1;\n```\n";
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        stream_reply(text, &mut sink, &options(4), &cancel)
            .await
            .unwrap();

        assert_eq!(sink.formatted.len(), 1);
        assert_eq!(sink.formatted[0], format(text));
        assert_eq!(sink.formatted[0].len(), 2);
    }
}
