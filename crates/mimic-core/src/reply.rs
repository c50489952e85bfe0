//! Canned reply generation.
//!
//! There is no model behind mimic: replies are static templates picked
//! by simple keyword checks, echoing the user's text back. Output is
//! deterministic so the streaming pipeline can be tested end to end.

/// Builds the assistant reply for a user submission.
pub fn reply_for(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower.contains("code") || lower.contains("example") {
        return format!(
            "Here is a small example for \"{trimmed}\":\n\n\
             ```rust\n\
             fn main() {{\n    println!(\"hello from mimic\");\n}}\n\
             ```\n\n\
             The block above is revealed as raw text first, then swapped \
             for the formatted version. Press Ctrl+Y to copy it."
        );
    }

    if lower.starts_with("hello") || lower.starts_with("hi") || lower.starts_with("hey") {
        return "Hello! I am a simulated assistant: every reply is generated \
                locally and revealed character by character. Ask for a `code` \
                example to see fenced blocks, or wrap words in `backticks` \
                for inline code."
            .to_string();
    }

    if lower.contains("help") {
        return "A few things to try:\n\
                single newlines become line breaks,\n\
                blank lines start new paragraphs.\n\n\
                Inline spans like `let x = 1;` keep their own style, and \
                asking for an example produces a fenced code block."
            .to_string();
    }

    format!(
        "You said: \"{trimmed}\"\n\n\
         This is a simulated reply. Nothing left your terminal; the text \
         is revealed in chunks to mimic streaming and formatted once the \
         reveal finishes."
    )
}
