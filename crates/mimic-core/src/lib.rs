//! Core pipeline for mimic: text formatting and the streaming reveal.
//!
//! The two halves compose linearly: [`stream::stream_reply`] pushes raw
//! prefixes of a reply into a [`stream::DisplaySink`] at a fixed cadence,
//! then commits the [`format::format`] rendering of the full text once.

pub mod config;
pub mod format;
pub mod message;
pub mod reply;
pub mod stream;

pub use config::{Config, Theme};
pub use format::{FormattedBlock, Inline, format, to_html};
pub use message::{RawMessage, Role};
pub use stream::{
    DisplaySink, SinkError, StreamError, StreamOptions, StreamOutcome, stream_reply,
};
