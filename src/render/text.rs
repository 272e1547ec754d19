//! Plain text helpers shared by the renderers and chunkers.

use crate::model::Span;

/// Count line breaks in `text`.
pub fn count_lines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Make sure `text` ends with a blank line, the separator expected between
/// blocks on a page.
pub fn ensure_block_separation(mut text: String) -> String {
    if text.ends_with("\n\n") {
        return text;
    }
    if text.ends_with('\n') {
        text.push('\n');
    } else {
        text.push_str("\n\n");
    }
    text
}

/// Offset of the start of the line containing `offset`.
pub fn line_start(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    source.as_bytes()[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1)
}

/// Offset just past the next line break at or after `offset`, or the end
/// of `source`.
pub fn line_end(source: &str, offset: usize) -> usize {
    let bytes = source.as_bytes();
    let offset = offset.min(bytes.len());
    bytes[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |i| offset + i + 1)
}

/// Widen `span` to whole source lines and return that slice, including the
/// final line break.
pub fn expand_to_lines(source: &str, span: Span) -> &str {
    let end = span.end.min(source.len());
    let start = line_start(source, span.start.min(end));
    let end = if end > start && source.as_bytes()[end - 1] == b'\n' {
        end
    } else {
        line_end(source, end)
    };
    &source[start..end]
}

/// Greedy word wrap: words are added to a line until the next one would
/// exceed `width` characters. A word wider than `width` gets a line of its
/// own. A `width` of 0 disables wrapping.
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if width > 0 && line_width > 0 && line_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}
