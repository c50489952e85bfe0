//! View layer: draws the transcript, input box, and status line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::input::InputState;
use crate::state::AppState;
use crate::theme;
use crate::transcript::StyledLine;

const SPINNER_FRAMES: [&str; 4] = ["⠋", "⠙", "⠸", "⠴"];

/// Rows the input box occupies, growing with multi-line input.
pub fn input_height(input: &InputState) -> u16 {
    let lines = input.text().split('\n').count();
    let lines = u16::try_from(lines).unwrap_or(u16::MAX).min(4);
    // One row per line plus the border.
    lines + 2
}

pub fn render(state: &AppState, frame: &mut Frame) {
    let [transcript_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(input_height(&state.input)),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_transcript(state, frame, transcript_area);
    render_input(state, frame, input_area);
    render_status(state, frame, status_area);
}

fn render_transcript(state: &AppState, frame: &mut Frame, area: Rect) {
    let wrap_width = usize::from(area.width.saturating_sub(2));
    let lines = state.transcript.display_lines(wrap_width);

    let offset = state.transcript.scroll_offset();
    let visible: Vec<Line> = lines
        .iter()
        .skip(offset)
        .take(usize::from(area.height))
        .map(|line| to_term_line(line, state))
        .collect();

    let paragraph = Paragraph::new(visible)
        .block(Block::default().padding(ratatui::widgets::Padding::horizontal(1)));
    frame.render_widget(paragraph, area);
}

fn to_term_line<'a>(line: &'a StyledLine, state: &AppState) -> Line<'a> {
    Line::from(
        line.spans
            .iter()
            .map(|span| Span::styled(span.text.as_str(), theme::style_for(span.style, state.theme)))
            .collect::<Vec<_>>(),
    )
}

fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(state.theme))
        .title(" mimic ");
    let inner = block.inner(area);

    let text: Vec<Line> = state.input.text().split('\n').map(Line::from).collect();
    frame.render_widget(Paragraph::new(text).block(block), area);

    // Place the terminal cursor at the input cursor.
    let (line, col) = state.input.cursor_line_col();
    let line_text = state
        .input
        .text()
        .split('\n')
        .nth(line)
        .unwrap_or_default();
    let prefix: String = line_text.chars().take(col).collect();
    let x = inner.x + u16::try_from(prefix.width()).unwrap_or(0);
    let y = inner.y + u16::try_from(line).unwrap_or(0);
    if x < inner.right() && y < inner.bottom() {
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn render_status(state: &AppState, frame: &mut Frame, area: Rect) {
    let line = if state.stream.is_streaming() {
        let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        Line::from(vec![
            Span::styled(format!(" {spinner} streaming"), theme::accent(state.theme)),
            Span::styled("  Esc to cancel", theme::hint(state.theme)),
        ])
    } else if let Some(preview) = state.copy_flash() {
        Line::from(Span::styled(
            format!(" Copied: {preview}"),
            theme::accent(state.theme),
        ))
    } else {
        Line::from(Span::styled(
            " Enter send · Alt+Enter newline · Ctrl+Y copy code · Ctrl+T theme · Ctrl+C quit",
            theme::hint(state.theme),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
