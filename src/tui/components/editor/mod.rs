//! # Editor Components
//!
//! Text entry for the two halves of the expression: a single-line field
//! for the options (and the collapsed argument), and a multi-line editor
//! for arguments that outgrow one line.
//!
//! ## Responsibilities
//!
//! - Capture text input with the caret on a character boundary at all times
//! - Handle editing (backspace, delete, caret movement, paste)
//! - Keep the caret visible by scrolling the viewport, never wrapping
//! - Report every mutation so the expression re-evaluates as it is typed
//!
//! ## State Management
//!
//! The buffer is internal state, seeded from the expression with `load()`
//! when a surface gains the text. Focus is a prop from the application
//! state; the theme is fixed at construction.

mod area;
mod caret;

pub use area::AreaEditor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// High-level events emitted by the editors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// The buffer changed; the parent should pick up the new text.
    Changed,
    /// Only the caret moved.
    Moved,
}

/// Single-line input with horizontal scrolling.
///
/// # Props
///
/// - `focused`: whether the field owns the caret (from App state)
///
/// # State
///
/// - `buffer`: current text
/// - `cursor`: caret byte offset
/// - `scroll`: byte offset of the first visible character
pub struct FieldEditor {
    buffer: String,
    cursor: usize,
    scroll: usize,
    placeholder: &'static str,
    /// Whether the field owns the caret (Prop)
    pub focused: bool,
    theme: &'static Theme,
}

impl FieldEditor {
    pub fn new(placeholder: &'static str, theme: &'static Theme) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
            placeholder,
            focused: false,
            theme,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer, putting the caret at the end.
    pub fn load(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
        self.scroll = 0;
    }

    /// Scroll so the caret sits inside a viewport of `width` cells, with
    /// one cell spare for the caret to rest past the last character.
    fn sync_scroll(&mut self, width: usize) {
        if width == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        while caret::display_width(&self.buffer[self.scroll..self.cursor]) >= width {
            self.scroll = caret::next_char_boundary(&self.buffer, self.scroll);
        }
    }

    fn visible_text(&self, width: usize) -> &str {
        caret::clip_to_width(&self.buffer[self.scroll..], width)
    }
}

impl Component for FieldEditor {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;
        self.sync_scroll(width);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder).style(self.theme.hint_style())
        } else {
            Paragraph::new(self.visible_text(width)).style(self.theme.text_style())
        };
        frame.render_widget(paragraph, area);

        if self.focused {
            let offset = caret::display_width(&self.buffer[self.scroll..self.cursor]);
            frame.set_cursor_position((area.x + offset as u16, area.y));
        }
    }
}

impl EventHandler for FieldEditor {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(EditorEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Line breaks have no place in a one-line field.
                let flat = text.replace(['\n', '\r'], " ");
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                Some(EditorEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = caret::prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(EditorEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = caret::next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(EditorEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::Left => {
                if self.cursor > 0 {
                    self.cursor = caret::prev_char_boundary(&self.buffer, self.cursor);
                    Some(EditorEvent::Moved)
                } else {
                    None
                }
            }
            TuiEvent::Right => {
                if self.cursor < self.buffer.len() {
                    self.cursor = caret::next_char_boundary(&self.buffer, self.cursor);
                    Some(EditorEvent::Moved)
                } else {
                    None
                }
            }
            TuiEvent::Home => (self.cursor != 0).then(|| {
                self.cursor = 0;
                EditorEvent::Moved
            }),
            TuiEvent::End => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                EditorEvent::Moved
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::THEMES;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn field() -> FieldEditor {
        FieldEditor::new("<empty>", &THEMES[0])
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut editor = field();

        assert_eq!(
            editor.handle_event(&TuiEvent::InputChar('a')),
            Some(EditorEvent::Changed)
        );
        assert_eq!(
            editor.handle_event(&TuiEvent::InputChar('b')),
            Some(EditorEvent::Changed)
        );
        assert_eq!(editor.text(), "ab");

        assert_eq!(
            editor.handle_event(&TuiEvent::Backspace),
            Some(EditorEvent::Changed)
        );
        assert_eq!(editor.text(), "a");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut editor = field();
        editor.handle_event(&TuiEvent::InputChar('é'));
        editor.handle_event(&TuiEvent::InputChar('x'));
        editor.handle_event(&TuiEvent::Left);
        editor.handle_event(&TuiEvent::Left);
        editor.handle_event(&TuiEvent::Delete);
        assert_eq!(editor.text(), "x");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut editor = field();
        let event = TuiEvent::Paste("a\nb\rc".to_string());
        assert_eq!(editor.handle_event(&event), Some(EditorEvent::Changed));
        assert_eq!(editor.text(), "a b c");
    }

    #[test]
    fn test_load_puts_caret_at_end() {
        let mut editor = field();
        editor.load("hello");
        editor.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(editor.text(), "hello!");
    }

    #[test]
    fn test_movement_reports_moved_not_changed() {
        let mut editor = field();
        editor.load("ab");
        assert_eq!(editor.handle_event(&TuiEvent::Left), Some(EditorEvent::Moved));
        assert_eq!(editor.handle_event(&TuiEvent::Home), Some(EditorEvent::Moved));
        assert_eq!(editor.handle_event(&TuiEvent::Home), None);
        assert_eq!(editor.handle_event(&TuiEvent::End), Some(EditorEvent::Moved));
        assert_eq!(editor.handle_event(&TuiEvent::Right), None);
    }

    #[test]
    fn test_viewport_follows_caret() {
        let mut editor = field();
        editor.load("abcdefghij");
        editor.sync_scroll(5);
        // Caret at the end: the window shows the tail with one spare cell
        assert_eq!(editor.visible_text(5), "ghij");

        editor.handle_event(&TuiEvent::Home);
        editor.sync_scroll(5);
        assert_eq!(editor.visible_text(5), "abcde");
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(20, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut editor = field();
        terminal
            .draw(|f| editor.render(f, f.area()))
            .unwrap();
        let row: String = (0..7)
            .map(|x| terminal.backend().buffer()[(x, 0)].symbol().to_string())
            .collect();
        assert_eq!(row, "<empty>");
    }
}
