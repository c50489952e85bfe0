//! Small shared helpers for the TUI.

use unicode_width::UnicodeWidthStr;

/// Truncates `text` to at most `max_width` terminal columns, appending
/// an ellipsis when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Collapses newlines so a multi-line string fits a one-line status slot.
pub fn single_line_preview(text: &str, max_width: usize) -> String {
    let flat = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    truncate_with_ellipsis(&flat, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_zero_width() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK glyph is two columns wide.
        let truncated = truncate_with_ellipsis("日本語テスト", 5);
        assert_eq!(truncated, "日本…");
    }

    #[test]
    fn test_single_line_preview_flattens_newlines() {
        assert_eq!(
            single_line_preview("fn main() {\n    body\n}", 40),
            "fn main() { body }"
        );
    }
}
