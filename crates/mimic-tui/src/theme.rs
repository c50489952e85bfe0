//! Translation from semantic transcript styles to terminal styles.

use mimic_core::Theme;
use ratatui::style::{Color, Modifier, Style as TermStyle};

use crate::transcript::Style;

/// Maps a semantic style to a concrete terminal style for the theme.
pub fn style_for(style: Style, theme: Theme) -> TermStyle {
    match theme {
        Theme::Dark => dark(style),
        Theme::Light => light(style),
    }
}

fn dark(style: Style) -> TermStyle {
    match style {
        Style::UserPrefix => TermStyle::default().fg(Color::DarkGray),
        Style::User => TermStyle::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
        Style::Assistant => TermStyle::default().fg(Color::White),
        Style::StreamingCursor => TermStyle::default().fg(Color::Cyan),
        Style::System => TermStyle::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        Style::Interrupted => TermStyle::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        Style::CodeInline => TermStyle::default().fg(Color::Yellow),
        Style::CodeBlock => TermStyle::default().fg(Color::Green),
        Style::CodeFence => TermStyle::default().fg(Color::DarkGray),
    }
}

fn light(style: Style) -> TermStyle {
    match style {
        Style::UserPrefix => TermStyle::default().fg(Color::Gray),
        Style::User => TermStyle::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        Style::Assistant => TermStyle::default().fg(Color::Black),
        Style::StreamingCursor => TermStyle::default().fg(Color::Blue),
        Style::System => TermStyle::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
        Style::Interrupted => TermStyle::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::DIM),
        Style::CodeInline => TermStyle::default().fg(Color::Magenta),
        Style::CodeBlock => TermStyle::default().fg(Color::Blue),
        Style::CodeFence => TermStyle::default().fg(Color::Gray),
    }
}

/// Border color for the input box.
pub fn border(theme: Theme) -> TermStyle {
    match theme {
        Theme::Dark => TermStyle::default().fg(Color::DarkGray),
        Theme::Light => TermStyle::default().fg(Color::Gray),
    }
}

/// Dimmed style for the status line hints.
pub fn hint(theme: Theme) -> TermStyle {
    match theme {
        Theme::Dark => TermStyle::default().fg(Color::DarkGray),
        Theme::Light => TermStyle::default().fg(Color::Gray),
    }
}

/// Accent style for the status line while streaming or after a copy.
pub fn accent(theme: Theme) -> TermStyle {
    match theme {
        Theme::Dark => TermStyle::default().fg(Color::Cyan),
        Theme::Light => TermStyle::default().fg(Color::Blue),
    }
}
