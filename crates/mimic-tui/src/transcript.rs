//! Conversation transcript: cells, styling, wrapping, and scrolling.
//!
//! The transcript is UI-agnostic: it produces [`StyledLine`]s with
//! semantic [`Style`] markers that the renderer translates to terminal
//! styles. Streaming replies live in the last cell as raw text and are
//! swapped for formatted blocks when the reveal finishes.

use mimic_core::RawMessage;
use mimic_core::format::{FormattedBlock, Inline, unescape};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A styled span of text (UI-agnostic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: Style,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A line of styled spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    pub fn empty() -> Self {
        StyledLine { spans: vec![] }
    }

    pub fn single(text: impl Into<String>, style: Style) -> Self {
        StyledLine {
            spans: vec![StyledSpan::new(text, style)],
        }
    }

    /// Concatenated plain text of the line, used by tests.
    pub fn to_plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Semantic style identifiers, translated to terminal styles by the
/// renderer. Keeps this module free of terminal dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// User message prefix ("│ ").
    UserPrefix,
    /// User message content (italic).
    User,
    /// Assistant message content.
    Assistant,
    /// Streaming cursor indicator.
    StreamingCursor,
    /// System message content (dim).
    System,
    /// Interrupted suffix indicator (dim).
    Interrupted,
    /// Inline code (`code`).
    CodeInline,
    /// Fenced code block content.
    CodeBlock,
    /// Code fence markers (rendered subtly).
    CodeFence,
}

/// Body of an assistant cell through the streaming lifecycle.
#[derive(Debug, Clone)]
pub enum AssistantBody {
    /// Reveal in progress; holds the raw prefix shown so far.
    Streaming { raw: String },
    /// Reveal finished and the formatted commit landed.
    Final { blocks: Vec<FormattedBlock> },
    /// Reveal cancelled or failed; keeps whatever raw text was shown.
    Interrupted { raw: String },
}

/// One entry in the conversation transcript.
#[derive(Debug, Clone)]
pub enum HistoryCell {
    User { message: RawMessage },
    Assistant {
        message: RawMessage,
        body: AssistantBody,
    },
    System { text: String },
}

/// Scroll position within the rendered transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Pinned to the newest line; streaming keeps the view at the bottom.
    #[default]
    FollowLatest,
    /// User scrolled away; `offset` is the first visible line index.
    Anchored { offset: usize },
}

#[derive(Debug, Clone, Default)]
pub struct TranscriptState {
    cells: Vec<HistoryCell>,
    pub scroll: ScrollMode,
    /// Rendered line count at the last layout width, for scroll clamping.
    line_count: usize,
    /// Transcript viewport height from the last frame.
    viewport_height: usize,
}

impl TranscriptState {
    pub fn cells(&self) -> &[HistoryCell] {
        &self.cells
    }

    pub fn push_user(&mut self, text: &str) {
        self.cells.push(HistoryCell::User {
            message: RawMessage::user(text),
        });
        self.scroll = ScrollMode::FollowLatest;
    }

    pub fn push_system(&mut self, text: &str) {
        self.cells.push(HistoryCell::System {
            text: text.to_string(),
        });
    }

    /// Opens a new assistant cell that will be revealed by the stream.
    pub fn begin_assistant(&mut self, reply_text: &str) {
        self.cells.push(HistoryCell::Assistant {
            message: RawMessage::assistant(reply_text),
            body: AssistantBody::Streaming { raw: String::new() },
        });
        self.scroll = ScrollMode::FollowLatest;
    }

    /// Replaces the revealed raw prefix of the active streaming cell.
    ///
    /// The stream only ever sends strictly growing prefixes, so a plain
    /// replace is enough. Ignored when no cell is streaming.
    pub fn set_stream_raw(&mut self, text: String) {
        if let Some(HistoryCell::Assistant { body, .. }) = self.cells.last_mut()
            && matches!(body, AssistantBody::Streaming { .. })
        {
            *body = AssistantBody::Streaming { raw: text };
        }
    }

    /// Commits the formatted blocks, ending the streaming lifecycle.
    pub fn finalize_stream(&mut self, blocks: Vec<FormattedBlock>) {
        if let Some(HistoryCell::Assistant { body, .. }) = self.cells.last_mut()
            && matches!(body, AssistantBody::Streaming { .. })
        {
            *body = AssistantBody::Final { blocks };
        }
    }

    /// Marks the active streaming cell as interrupted, keeping the raw
    /// prefix that was already on screen.
    pub fn interrupt_stream(&mut self) {
        if let Some(HistoryCell::Assistant { body, .. }) = self.cells.last_mut()
            && let AssistantBody::Streaming { raw } = body
        {
            let raw = std::mem::take(raw);
            *body = AssistantBody::Interrupted { raw };
        }
    }

    /// Code of the most recent fenced block in a finalized assistant
    /// reply, de-escaped for the clipboard.
    pub fn last_code_block(&self) -> Option<String> {
        for cell in self.cells.iter().rev() {
            if let HistoryCell::Assistant {
                body: AssistantBody::Final { blocks },
                ..
            } = cell
            {
                for block in blocks.iter().rev() {
                    if let FormattedBlock::CodeBlock { code, .. } = block {
                        return Some(unescape(code));
                    }
                }
            }
        }
        None
    }

    /// Records the viewport geometry and the rendered line count for
    /// the current width. Called once per frame before rendering.
    pub fn update_layout(&mut self, width: usize, viewport_height: usize) {
        self.viewport_height = viewport_height;
        self.line_count = self.display_lines(width).len();
        self.clamp_scroll();
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    fn max_offset(&self) -> usize {
        self.line_count.saturating_sub(self.viewport_height)
    }

    /// First visible line index for the current scroll mode.
    pub fn scroll_offset(&self) -> usize {
        match self.scroll {
            ScrollMode::FollowLatest => self.max_offset(),
            ScrollMode::Anchored { offset } => offset.min(self.max_offset()),
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let offset = self.scroll_offset().saturating_sub(lines);
        self.scroll = ScrollMode::Anchored { offset };
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let offset = self.scroll_offset().saturating_add(lines);
        if offset >= self.max_offset() {
            self.scroll = ScrollMode::FollowLatest;
        } else {
            self.scroll = ScrollMode::Anchored { offset };
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = ScrollMode::Anchored { offset: 0 };
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = ScrollMode::FollowLatest;
    }

    fn clamp_scroll(&mut self) {
        if let ScrollMode::Anchored { offset } = self.scroll
            && offset >= self.max_offset()
        {
            self.scroll = ScrollMode::FollowLatest;
        }
    }

    /// Renders every cell to wrapped styled lines at the given width.
    pub fn display_lines(&self, width: usize) -> Vec<StyledLine> {
        let width = width.max(8);
        let mut lines = Vec::new();

        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                lines.push(StyledLine::empty());
            }
            match cell {
                HistoryCell::User { message } => {
                    push_user_lines(&mut lines, &message.text, width);
                }
                HistoryCell::System { text } => {
                    for line in wrap_spans(&[StyledSpan::new(text.clone(), Style::System)], width)
                    {
                        lines.push(line);
                    }
                }
                HistoryCell::Assistant { body, .. } => match body {
                    AssistantBody::Streaming { raw } => {
                        push_raw_lines(&mut lines, raw, width, RawTail::Cursor);
                    }
                    AssistantBody::Interrupted { raw } => {
                        push_raw_lines(&mut lines, raw, width, RawTail::Interrupted);
                    }
                    AssistantBody::Final { blocks } => {
                        push_block_lines(&mut lines, blocks, width);
                    }
                },
            }
        }

        lines
    }
}

/// What to append after the last raw line of an assistant cell.
#[derive(Clone, Copy)]
enum RawTail {
    Cursor,
    Interrupted,
}

fn push_user_lines(lines: &mut Vec<StyledLine>, text: &str, width: usize) {
    let content_width = width.saturating_sub(2).max(4);
    for source_line in text.split('\n') {
        let wrapped = wrap_spans(
            &[StyledSpan::new(source_line.to_string(), Style::User)],
            content_width,
        );
        for mut line in wrapped {
            line.spans
                .insert(0, StyledSpan::new("│ ", Style::UserPrefix));
            lines.push(line);
        }
    }
}

/// Raw streaming text: split on newlines, wrapped, no formatting.
fn push_raw_lines(lines: &mut Vec<StyledLine>, raw: &str, width: usize, tail: RawTail) {
    let start = lines.len();
    for source_line in raw.split('\n') {
        for line in wrap_spans(
            &[StyledSpan::new(source_line.to_string(), Style::Assistant)],
            width,
        ) {
            lines.push(line);
        }
    }
    if lines.len() == start {
        lines.push(StyledLine::empty());
    }
    if let Some(last) = lines.last_mut() {
        match tail {
            RawTail::Cursor => {
                last.spans.push(StyledSpan::new("▌", Style::StreamingCursor));
            }
            RawTail::Interrupted => {
                last.spans
                    .push(StyledSpan::new(" (interrupted)", Style::Interrupted));
            }
        }
    }
}

/// Formatted blocks: paragraphs with inline styling, fenced code blocks
/// with fence markers and indented content.
fn push_block_lines(lines: &mut Vec<StyledLine>, blocks: &[FormattedBlock], width: usize) {
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            lines.push(StyledLine::empty());
        }
        match block {
            FormattedBlock::Paragraph(inlines) => {
                for spans in paragraph_span_lines(inlines) {
                    if spans.is_empty() {
                        lines.push(StyledLine::empty());
                        continue;
                    }
                    for line in wrap_spans(&spans, width) {
                        lines.push(line);
                    }
                }
            }
            FormattedBlock::CodeBlock { language, code } => {
                let fence = match language {
                    Some(lang) => format!("```{}", unescape(lang)),
                    None => "```".to_string(),
                };
                lines.push(StyledLine::single(fence, Style::CodeFence));
                for code_line in unescape(code).split('\n') {
                    lines.push(StyledLine::single(
                        format!("  {code_line}"),
                        Style::CodeBlock,
                    ));
                }
                lines.push(StyledLine::single("```", Style::CodeFence));
            }
        }
    }
}

/// Splits a paragraph's inline runs into per-line span lists at each
/// `Break`, de-escaping stored text for terminal display.
fn paragraph_span_lines(inlines: &[Inline]) -> Vec<Vec<StyledSpan>> {
    let mut out = vec![Vec::new()];
    for inline in inlines {
        match inline {
            Inline::Break => out.push(Vec::new()),
            Inline::Text(text) => {
                if let Some(last) = out.last_mut() {
                    last.push(StyledSpan::new(unescape(text), Style::Assistant));
                }
            }
            Inline::Code(code) => {
                if let Some(last) = out.last_mut() {
                    last.push(StyledSpan::new(unescape(code), Style::CodeInline));
                }
            }
        }
    }
    out
}

/// Greedy word wrap over styled spans, measuring terminal columns.
///
/// Words keep their span style; words wider than the full width are
/// hard-broken at character boundaries. Always yields at least one
/// line so callers can append suffix spans.
pub fn wrap_spans(spans: &[StyledSpan], width: usize) -> Vec<StyledLine> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current: Vec<StyledSpan> = Vec::new();
    let mut current_width = 0usize;

    let flush = |lines: &mut Vec<StyledLine>, current: &mut Vec<StyledSpan>, w: &mut usize| {
        lines.push(StyledLine {
            spans: std::mem::take(current),
        });
        *w = 0;
    };

    for span in spans {
        for token in tokenize(&span.text) {
            let token_width = token.width();
            let is_space = token.chars().all(|c| c == ' ');

            if current_width + token_width <= width {
                push_token(&mut current, token, span.style);
                current_width += token_width;
            } else if is_space {
                // Spaces at a wrap point are dropped, not carried over.
                flush(&mut lines, &mut current, &mut current_width);
            } else if token_width > width {
                // Hard-break an overlong word.
                for ch in token.chars() {
                    let w = ch.width().unwrap_or(0);
                    if current_width + w > width && !current.is_empty() {
                        flush(&mut lines, &mut current, &mut current_width);
                    }
                    push_token(&mut current, &ch.to_string(), span.style);
                    current_width += w;
                }
            } else {
                flush(&mut lines, &mut current, &mut current_width);
                push_token(&mut current, token, span.style);
                current_width += token_width;
            }
        }
    }

    lines.push(StyledLine { spans: current });
    lines
}

/// Splits text into alternating word and space runs.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, ch) in text.char_indices() {
        let space = ch == ' ';
        if in_space.is_some_and(|s| s != space) {
            tokens.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

fn push_token(current: &mut Vec<StyledSpan>, token: &str, style: Style) {
    if let Some(last) = current.last_mut()
        && last.style == style
    {
        last.text.push_str(token);
    } else {
        current.push(StyledSpan::new(token, style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::format;

    fn plain(lines: &[StyledLine]) -> Vec<String> {
        lines.iter().map(StyledLine::to_plain).collect()
    }

    #[test]
    fn test_wrap_short_line_untouched() {
        let lines = wrap_spans(&[StyledSpan::new("hello world", Style::Assistant)], 20);
        assert_eq!(plain(&lines), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_breaks_at_words() {
        let lines = wrap_spans(&[StyledSpan::new("alpha beta gamma", Style::Assistant)], 10);
        assert_eq!(plain(&lines), vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn test_wrap_hard_breaks_long_word() {
        let lines = wrap_spans(&[StyledSpan::new("abcdefghij", Style::Assistant)], 4);
        assert_eq!(plain(&lines), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_preserves_span_styles() {
        let spans = [
            StyledSpan::new("run ", Style::Assistant),
            StyledSpan::new("cargo", Style::CodeInline),
        ];
        let lines = wrap_spans(&spans, 20);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].style, Style::Assistant);
        assert_eq!(lines[0].spans[1].style, Style::CodeInline);
        assert_eq!(lines[0].to_plain(), "run cargo");
    }

    #[test]
    fn test_streaming_cell_shows_cursor() {
        let mut transcript = TranscriptState::default();
        transcript.begin_assistant("full reply");
        transcript.set_stream_raw("full r".to_string());

        let lines = transcript.display_lines(40);
        assert_eq!(lines.last().unwrap().to_plain(), "full r▌");
    }

    #[test]
    fn test_finalize_swaps_raw_for_blocks() {
        let mut transcript = TranscriptState::default();
        transcript.begin_assistant("hello `code` here");
        transcript.set_stream_raw("hello `code` here".to_string());
        transcript.finalize_stream(format("hello `code` here"));

        let lines = transcript.display_lines(40);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_plain(), "hello code here");
        assert!(
            lines[0]
                .spans
                .iter()
                .any(|s| s.style == Style::CodeInline && s.text == "code")
        );
    }

    #[test]
    fn test_interrupt_keeps_raw_prefix() {
        let mut transcript = TranscriptState::default();
        transcript.begin_assistant("the full reply text");
        transcript.set_stream_raw("the fu".to_string());
        transcript.interrupt_stream();

        let lines = transcript.display_lines(40);
        assert_eq!(lines.last().unwrap().to_plain(), "the fu (interrupted)");
    }

    #[test]
    fn test_interrupt_after_finalize_is_noop() {
        let mut transcript = TranscriptState::default();
        transcript.begin_assistant("done");
        transcript.finalize_stream(format("done"));
        transcript.interrupt_stream();

        let lines = transcript.display_lines(40);
        assert_eq!(lines[0].to_plain(), "done");
    }

    #[test]
    fn test_code_block_rendering_and_copy() {
        let text = "Try this:\n\n```js\nconsole.log(1)\n```";
        let mut transcript = TranscriptState::default();
        transcript.begin_assistant(text);
        transcript.finalize_stream(format(text));

        let rendered = plain(&transcript.display_lines(40));
        assert!(rendered.contains(&"```js".to_string()));
        assert!(rendered.contains(&"  console.log(1)".to_string()));

        assert_eq!(transcript.last_code_block(), Some("console.log(1)".into()));
    }

    #[test]
    fn test_last_code_block_unescapes_entities() {
        let text = "```\na < b && c > d\n```";
        let mut transcript = TranscriptState::default();
        transcript.begin_assistant(text);
        transcript.finalize_stream(format(text));

        assert_eq!(
            transcript.last_code_block(),
            Some("a < b && c > d".to_string())
        );
    }

    #[test]
    fn test_last_code_block_none_without_fences() {
        let mut transcript = TranscriptState::default();
        transcript.begin_assistant("plain");
        transcript.finalize_stream(format("plain"));
        assert_eq!(transcript.last_code_block(), None);
    }

    #[test]
    fn test_user_lines_carry_prefix() {
        let mut transcript = TranscriptState::default();
        transcript.push_user("hi there");

        let lines = transcript.display_lines(40);
        assert_eq!(lines[0].to_plain(), "│ hi there");
        assert_eq!(lines[0].spans[0].style, Style::UserPrefix);
    }

    #[test]
    fn test_cells_separated_by_blank_line() {
        let mut transcript = TranscriptState::default();
        transcript.push_user("one");
        transcript.push_user("two");

        let rendered = plain(&transcript.display_lines(40));
        assert_eq!(rendered, vec!["│ one", "", "│ two"]);
    }

    #[test]
    fn test_scroll_anchors_and_follows() {
        let mut transcript = TranscriptState::default();
        for i in 0..20 {
            transcript.push_user(&format!("message {i}"));
        }
        transcript.update_layout(40, 10);

        assert_eq!(transcript.scroll, ScrollMode::FollowLatest);
        let bottom = transcript.scroll_offset();
        assert!(bottom > 0);

        transcript.scroll_up(5);
        assert_eq!(transcript.scroll_offset(), bottom - 5);

        transcript.scroll_down(5);
        assert_eq!(transcript.scroll, ScrollMode::FollowLatest);

        transcript.scroll_to_top();
        assert_eq!(transcript.scroll_offset(), 0);
        transcript.scroll_to_bottom();
        assert_eq!(transcript.scroll_offset(), bottom);
    }

    #[test]
    fn test_paragraph_breaks_render_as_lines() {
        let text = "first line\nsecond line";
        let mut transcript = TranscriptState::default();
        transcript.begin_assistant(text);
        transcript.finalize_stream(format(text));

        let rendered = plain(&transcript.display_lines(40));
        assert_eq!(rendered, vec!["first line", "second line"]);
    }
}
