//! Display sink that forwards stream output to the runtime inbox.
//!
//! The streaming task runs off the UI thread; every reveal and the
//! final commit cross over as inbox events. A closed inbox (runtime
//! torn down) surfaces as a sink error, which aborts the stream.

use mimic_core::{DisplaySink, FormattedBlock, SinkError};
use tokio::sync::mpsc::UnboundedSender;

use crate::events::UiEvent;

pub struct InboxSink {
    tx: UnboundedSender<UiEvent>,
}

impl InboxSink {
    pub fn new(tx: UnboundedSender<UiEvent>) -> Self {
        Self { tx }
    }
}

impl DisplaySink for InboxSink {
    fn set_raw_text(&mut self, text: &str) -> Result<(), SinkError> {
        self.tx
            .send(UiEvent::StreamRaw {
                text: text.to_string(),
            })
            .map_err(|_| SinkError("display inbox closed".to_string()))
    }

    fn set_formatted(&mut self, blocks: Vec<FormattedBlock>) -> Result<(), SinkError> {
        self.tx
            .send(UiEvent::StreamCommitted { blocks })
            .map_err(|_| SinkError("display inbox closed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::format;
    use tokio::sync::mpsc;

    #[test]
    fn test_forwards_raw_and_formatted() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut sink = InboxSink::new(tx);

        sink.set_raw_text("he").unwrap();
        sink.set_formatted(format("hello")).unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            UiEvent::StreamRaw { text } if text == "he"
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            UiEvent::StreamCommitted { .. }
        ));
    }

    #[test]
    fn test_closed_inbox_is_sink_error() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut sink = InboxSink::new(tx);

        assert!(sink.set_raw_text("x").is_err());
        assert!(sink.set_formatted(Vec::new()).is_err());
    }
}
