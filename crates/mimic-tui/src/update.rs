//! Pure reducer: folds events into state and emits effects.
//!
//! No IO happens here. The runtime executes the returned effects and
//! feeds any results back through the inbox as new events.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use mimic_core::reply::reply_for;
use mimic_core::stream::StreamOutcome;

use crate::common::single_line_preview;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::render;
use crate::state::{AppState, StreamState};

const SCROLL_STEP: usize = 3;
const COPY_PREVIEW_WIDTH: usize = 32;

pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            if state.copied.is_some() && state.copy_flash().is_none() {
                state.copied = None;
            }
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(state, width, height);
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) => handle_key(state, key),
        UiEvent::Terminal(Event::Mouse(mouse)) => handle_mouse(state, mouse),
        UiEvent::Terminal(_) => vec![],
        UiEvent::StreamStarted { cancel } => {
            state.stream = StreamState::Streaming { cancel };
            vec![]
        }
        UiEvent::StreamRaw { text } => {
            state.transcript.set_stream_raw(text);
            vec![]
        }
        UiEvent::StreamCommitted { blocks } => {
            state.transcript.finalize_stream(blocks);
            vec![]
        }
        UiEvent::StreamClosed { outcome } => {
            state.stream = StreamState::Idle;
            match outcome {
                Ok(StreamOutcome::Completed) => {}
                Ok(StreamOutcome::Cancelled) => state.transcript.interrupt_stream(),
                Err(message) => {
                    state.transcript.interrupt_stream();
                    state
                        .transcript
                        .push_system(&format!("Streaming failed: {message}"));
                }
            }
            vec![]
        }
        UiEvent::ClipboardCopied { preview } => {
            state.copied = Some((std::time::Instant::now(), preview));
            vec![]
        }
    }
}

fn handle_frame(state: &mut AppState, width: u16, height: u16) {
    let input_height = render::input_height(&state.input);
    let viewport = height.saturating_sub(input_height + 1);
    let wrap_width = usize::from(width.saturating_sub(2));
    state
        .transcript
        .update_layout(wrap_width, usize::from(viewport));
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('t') if ctrl => {
            state.theme = state.theme.toggled();
            vec![UiEffect::PersistTheme { theme: state.theme }]
        }
        KeyCode::Char('y') if ctrl => match state.transcript.last_code_block() {
            Some(code) => vec![UiEffect::CopyCodeBlock { code }],
            None => vec![],
        },
        KeyCode::Esc => {
            if state.stream.is_streaming() {
                vec![UiEffect::CancelStream]
            } else {
                vec![]
            }
        }
        KeyCode::Enter if alt => {
            state.input.insert_newline();
            vec![]
        }
        KeyCode::Enter => submit(state),
        KeyCode::Backspace => {
            state.input.backspace();
            vec![]
        }
        KeyCode::Delete => {
            state.input.delete();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.move_home();
            vec![]
        }
        KeyCode::End => {
            state.input.move_end();
            vec![]
        }
        KeyCode::PageUp => {
            let page = state.transcript.viewport_height().saturating_sub(1).max(1);
            state.transcript.scroll_up(page);
            vec![]
        }
        KeyCode::PageDown => {
            let page = state.transcript.viewport_height().saturating_sub(1).max(1);
            state.transcript.scroll_down(page);
            vec![]
        }
        KeyCode::Char(ch) if !ctrl => {
            state.input.insert_char(ch);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    match mouse.kind {
        MouseEventKind::ScrollUp => state.transcript.scroll_up(SCROLL_STEP),
        MouseEventKind::ScrollDown => state.transcript.scroll_down(SCROLL_STEP),
        _ => {}
    }
    vec![]
}

/// Enter: submit the input buffer and start the reply stream.
///
/// Ignored while a stream is active or when the buffer is blank; the
/// input keeps its contents in both cases.
fn submit(state: &mut AppState) -> Vec<UiEffect> {
    if state.stream.is_streaming() || state.input.text().trim().is_empty() {
        return vec![];
    }

    let text = state.input.take();
    let trimmed = text.trim();
    state.transcript.push_user(trimmed);

    let reply = reply_for(trimmed);
    state.transcript.begin_assistant(&reply);
    vec![UiEffect::StartStream { reply }]
}

/// Builds the clipboard preview shown in the status line.
pub fn copy_preview(code: &str) -> String {
    single_line_preview(code, COPY_PREVIEW_WIDTH)
}
