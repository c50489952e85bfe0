//! Text formatting: raw reply text into safe, render-ready blocks.
//!
//! The grammar is deliberately tiny: fenced code blocks, inline code
//! spans, and paragraphs. Everything else is literal text. All content
//! carried by the output blocks is HTML-escaped; no `<`, `>`, `&`, `"`
//! or `'` survives unescaped outside the five entity sequences.
//!
//! Fence detection is a linear scan over lines, not a regex: a fence
//! opens on a line that is three backticks plus an optional
//! word-character language tag, and closes on the next line starting
//! with three backticks. First closing fence wins; there is no nesting.
//! An unterminated fence does not match and stays literal prose.

/// An inline fragment inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Escaped prose text.
    Text(String),
    /// Escaped inline code from a single-backtick span.
    Code(String),
    /// Explicit line break (single newline inside a paragraph).
    Break,
}

/// A render-ready block derived from a message's raw text.
///
/// Blocks preserve the left-to-right order of fences and prose spans in
/// the source text. They are cheap to recompute and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedBlock {
    Paragraph(Vec<Inline>),
    CodeBlock {
        /// Escaped language tag from the opening fence, if present.
        language: Option<String>,
        /// Escaped code content, internal newlines preserved verbatim.
        code: String,
    },
}

/// Escapes the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape`]. `&amp;` is resolved last so escaped input
/// round-trips without collapsing distinct sequences.
pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Formats raw text into an ordered list of blocks.
///
/// Total over all inputs: malformed fences degrade to literal prose and
/// input that trims to empty yields an empty list.
pub fn format(text: &str) -> Vec<FormattedBlock> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks = Vec::new();
    let mut prose = String::new();
    let mut i = 0;

    while i < lines.len() {
        // A fence only matches when the closing delimiter exists; the
        // last line has no trailing newline, so an opener there cannot
        // have a body and is literal.
        if let Some(lang) = fence_opening(lines[i])
            && i + 1 < lines.len()
            && let Some(close) = lines[i + 1..].iter().position(|l| l.starts_with("```"))
        {
            flush_prose(&mut blocks, &mut prose);
            let body = lines[i + 1..i + 1 + close].join("\n");
            blocks.push(FormattedBlock::CodeBlock {
                language: (!lang.is_empty()).then(|| escape(lang)),
                code: escape(&body),
            });
            i += close + 2;
            continue;
        }
        prose.push_str(lines[i]);
        prose.push('\n');
        i += 1;
    }

    flush_prose(&mut blocks, &mut prose);
    blocks
}

/// Renders blocks into final HTML markup.
///
/// Block content is already escaped, so it is inserted verbatim.
pub fn to_html(blocks: &[FormattedBlock]) -> String {
    use std::fmt::Write;

    let mut html = String::new();
    for block in blocks {
        match block {
            FormattedBlock::Paragraph(inlines) => {
                html.push_str("<p>");
                for inline in inlines {
                    match inline {
                        Inline::Text(text) => html.push_str(text),
                        Inline::Code(code) => {
                            let _ = write!(html, "<code>{code}</code>");
                        }
                        Inline::Break => html.push_str("<br>"),
                    }
                }
                html.push_str("</p>\n");
            }
            FormattedBlock::CodeBlock { language, code } => {
                match language {
                    Some(lang) => {
                        let _ = write!(html, "<pre><code class=\"language-{lang}\">");
                    }
                    None => html.push_str("<pre><code>"),
                }
                html.push_str(code);
                html.push_str("</code></pre>\n");
            }
        }
    }
    html
}

/// Returns the language tag if the line opens a fence.
///
/// The tag must be word characters only, immediately after the
/// backticks; anything else on the opening line disqualifies it.
fn fence_opening(line: &str) -> Option<&str> {
    let tag = line.strip_prefix("```")?;
    tag.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
        .then_some(tag)
}

/// Converts accumulated prose into paragraph blocks and clears it.
///
/// Paragraphs split on two-or-more consecutive newlines; single
/// newlines inside a paragraph become explicit breaks.
fn flush_prose(blocks: &mut Vec<FormattedBlock>, prose: &mut String) {
    let text = std::mem::take(prose);
    let mut paragraph: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.is_empty() {
            push_paragraph(blocks, &paragraph);
            paragraph.clear();
        } else {
            paragraph.push(line);
        }
    }
    push_paragraph(blocks, &paragraph);
}

fn push_paragraph(blocks: &mut Vec<FormattedBlock>, lines: &[&str]) {
    if lines.iter().all(|l| l.trim().is_empty()) {
        return;
    }
    let mut inlines = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            inlines.push(Inline::Break);
        }
        line_inlines(line, &mut inlines);
    }
    blocks.push(FormattedBlock::Paragraph(inlines));
}

/// Splits one prose line into text and inline-code fragments.
///
/// A span must open and close on the same line and contain at least one
/// character; an unpaired or immediately-closed backtick is literal.
fn line_inlines(line: &str, out: &mut Vec<Inline>) {
    let mut pending = String::new();
    let mut rest = line;

    while let Some(open) = rest.find('`') {
        let after = &rest[open + 1..];
        match after.find('`') {
            Some(close) if close > 0 => {
                pending.push_str(&rest[..open]);
                if !pending.is_empty() {
                    out.push(Inline::Text(escape(&pending)));
                    pending.clear();
                }
                out.push(Inline::Code(escape(&after[..close])));
                rest = &after[close + 1..];
            }
            _ => {
                pending.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }

    pending.push_str(rest);
    if !pending.is_empty() {
        out.push(Inline::Text(escape(&pending)));
    }
}
