//! Pure text measurement helpers shared by both editors.
//!
//! These are stateless functions with no dependency on editor state. All
//! offsets are byte offsets into the buffer; all widths are display cells.
//! Tabs count as one cell because the editors render them as a space.

use unicode_width::UnicodeWidthChar;

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn char_width(c: char) -> usize {
    if c == '\t' {
        1
    } else {
        UnicodeWidthChar::width(c).unwrap_or(0)
    }
}

/// Display width of `text` in terminal cells.
pub(super) fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Byte offset within `line` of the character at display column `col`.
/// A column inside a wide character snaps to its start; columns past the
/// end clamp to the line's length.
pub(super) fn pos_at_col(line: &str, col: usize) -> usize {
    let mut width = 0;
    for (i, c) in line.char_indices() {
        let next = width + char_width(c);
        if next > col {
            return i;
        }
        width = next;
    }
    line.len()
}

/// Longest prefix of `line` that fits in `max_cols` display cells.
pub(super) fn clip_to_width(line: &str, max_cols: usize) -> &str {
    &line[..pos_at_col(line, max_cols)]
}
