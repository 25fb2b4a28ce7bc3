//! Multi-line argument editor. No soft wrap: lines render clipped and the
//! viewport scrolls vertically to follow the caret, so what you see is the
//! argument exactly as the shell will receive it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;

use super::caret;
use super::EditorEvent;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

pub struct AreaEditor {
    buffer: String,
    /// Caret byte offset.
    cursor: usize,
    /// First visible line.
    scroll: usize,
    /// Whether the editor owns the caret (Prop)
    pub focused: bool,
    theme: &'static Theme,
}

impl AreaEditor {
    pub fn new(theme: &'static Theme) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
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

    /// Byte offsets where each line starts.
    fn line_starts(&self) -> Vec<usize> {
        std::iter::once(0)
            .chain(self.buffer.match_indices('\n').map(|(i, _)| i + 1))
            .collect()
    }

    /// Index of the line holding the caret.
    fn cursor_line(&self) -> usize {
        self.buffer[..self.cursor].matches('\n').count()
    }

    /// Byte range of line `index`, newline excluded.
    fn line_bounds(&self, starts: &[usize], index: usize) -> (usize, usize) {
        let start = starts[index];
        let end = starts
            .get(index + 1)
            .map(|&next| next - 1)
            .unwrap_or(self.buffer.len());
        (start, end)
    }

    /// Move the caret a line up or down, staying as close as possible to
    /// the current display column.
    fn move_vertically(&mut self, delta: isize) -> bool {
        let starts = self.line_starts();
        let line = self.cursor_line();
        let target = line as isize + delta;
        if target < 0 || target as usize >= starts.len() {
            return false;
        }
        let col = caret::display_width(&self.buffer[starts[line]..self.cursor]);
        let (start, end) = self.line_bounds(&starts, target as usize);
        self.cursor = start + caret::pos_at_col(&self.buffer[start..end], col);
        true
    }

    fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }
}

impl Component for AreaEditor {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;
        let height = area.height as usize;
        let starts = self.line_starts();
        let cursor_line = self.cursor_line();

        // Follow the caret vertically.
        if cursor_line < self.scroll {
            self.scroll = cursor_line;
        }
        if height > 0 && cursor_line >= self.scroll + height {
            self.scroll = cursor_line + 1 - height;
        }

        let lines: Vec<Line> = (self.scroll..starts.len().min(self.scroll + height))
            .map(|index| {
                let (start, end) = self.line_bounds(&starts, index);
                let display = self.buffer[start..end].replace('\t', " ");
                Line::from(caret::clip_to_width(&display, width).to_string())
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Text::from(lines)).style(self.theme.text_style()),
            area,
        );

        if self.focused && height > 0 {
            let line_start = starts[cursor_line];
            let col = caret::display_width(&self.buffer[line_start..self.cursor]);
            let x = col.min(width.saturating_sub(1)) as u16;
            let y = (cursor_line - self.scroll) as u16;
            frame.set_cursor_position((area.x + x, area.y + y));
        }
    }
}

impl EventHandler for AreaEditor {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert(*c);
                Some(EditorEvent::Changed)
            }
            // Plain Enter is a line break here; submission needs a modifier.
            TuiEvent::Enter { modified: false } => {
                self.insert('\n');
                Some(EditorEvent::Changed)
            }
            TuiEvent::Tab => {
                self.insert('\t');
                Some(EditorEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
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
            TuiEvent::Up => self.move_vertically(-1).then_some(EditorEvent::Moved),
            TuiEvent::Down => self.move_vertically(1).then_some(EditorEvent::Moved),
            TuiEvent::Home => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    EditorEvent::Moved
                })
            }
            TuiEvent::End => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    EditorEvent::Moved
                })
            }
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

    fn editor() -> AreaEditor {
        AreaEditor::new(&THEMES[0])
    }

    fn type_str(editor: &mut AreaEditor, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                editor.handle_event(&TuiEvent::Enter { modified: false });
            } else {
                editor.handle_event(&TuiEvent::InputChar(c));
            }
        }
    }

    #[test]
    fn test_plain_enter_breaks_the_line() {
        let mut editor = editor();
        type_str(&mut editor, "s/a/b/\ns/c/d/");
        assert_eq!(editor.text(), "s/a/b/\ns/c/d/");
    }

    #[test]
    fn test_modified_enter_is_not_an_edit() {
        let mut editor = editor();
        type_str(&mut editor, "x");
        assert_eq!(editor.handle_event(&TuiEvent::Enter { modified: true }), None);
        assert_eq!(editor.text(), "x");
    }

    #[test]
    fn test_tab_inserts_literal_tab() {
        let mut editor = editor();
        editor.handle_event(&TuiEvent::Tab);
        type_str(&mut editor, "x");
        assert_eq!(editor.text(), "\tx");
    }

    #[test]
    fn test_paste_preserves_newlines() {
        let mut editor = editor();
        editor.handle_event(&TuiEvent::Paste("a\nb".to_string()));
        assert_eq!(editor.text(), "a\nb");
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut editor = editor();
        type_str(&mut editor, "abcdef\nxy\nlonger");

        // Caret at the end of "longer" (column 6); Up clamps to the end of
        // the shorter "xy", so Delete joins it with the next line.
        assert_eq!(editor.handle_event(&TuiEvent::Up), Some(EditorEvent::Moved));
        editor.handle_event(&TuiEvent::Delete);
        assert_eq!(editor.text(), "abcdef\nxylonger");

        // Now at column 2; Up keeps the column in the longer first line.
        editor.handle_event(&TuiEvent::Up);
        editor.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(editor.text(), "ab!cdef\nxylonger");
    }

    #[test]
    fn test_vertical_movement_stops_at_edges() {
        let mut editor = editor();
        type_str(&mut editor, "one\ntwo");
        assert_eq!(editor.handle_event(&TuiEvent::Down), None);
        editor.handle_event(&TuiEvent::Up);
        assert_eq!(editor.handle_event(&TuiEvent::Up), None);
    }

    #[test]
    fn test_home_and_end_are_line_wise() {
        let mut editor = editor();
        type_str(&mut editor, "first\nsecond");
        editor.handle_event(&TuiEvent::Home);
        editor.handle_event(&TuiEvent::InputChar('>'));
        assert_eq!(editor.text(), "first\n>second");
        editor.handle_event(&TuiEvent::End);
        editor.handle_event(&TuiEvent::InputChar('<'));
        assert_eq!(editor.text(), "first\n>second<");
    }

    #[test]
    fn test_load_round_trips() {
        let mut editor = editor();
        editor.load("keep\nme\nintact");
        assert_eq!(editor.text(), "keep\nme\nintact");
        editor.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(editor.text(), "keep\nme\nintact!");
    }

    #[test]
    fn test_render_clips_without_panicking() {
        let backend = TestBackend::new(5, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut editor = editor();
        editor.load("a very long line that cannot fit\nsecond\nthird\nfourth");
        editor.focused = true;
        terminal.draw(|f| editor.render(f, f.area())).unwrap();
    }
}
