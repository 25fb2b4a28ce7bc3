//! # FileView Component
//!
//! Full-screen preview of one highlighted file. The syntect scheme's
//! canvas color is painted behind the text so previews look like the
//! scheme intends, not like the terminal default.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::highlight::Highlighted;
use crate::tui::theme::Theme;

pub struct FileView {
    title: String,
    text: Text<'static>,
    background: Option<Color>,
    scroll: usize,
    last_height: u16,
    theme: &'static Theme,
}

impl FileView {
    pub fn new(theme: &'static Theme) -> Self {
        Self {
            title: String::new(),
            text: Text::default(),
            background: None,
            scroll: 0,
            last_height: 0,
            theme,
        }
    }

    /// Load a highlighted file, replacing the previous one and scrolling
    /// back to the top.
    pub fn show(&mut self, path: &str, highlighted: Highlighted) {
        self.title = path.to_string();
        self.text = highlighted.text;
        self.background = highlighted.background;
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.text
            .lines
            .len()
            .saturating_sub(self.last_height.max(1) as usize)
    }

    fn scroll_by(&mut self, delta: isize) -> Option<()> {
        let target = (self.scroll as isize + delta).clamp(0, self.max_scroll() as isize) as usize;
        (target != self.scroll).then(|| {
            self.scroll = target;
        })
    }
}

impl Component for FileView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = self.theme.panel_block(&self.title, true);
        let inner = block.inner(area);
        self.last_height = inner.height;
        self.scroll = self.scroll.min(self.max_scroll());

        let end = (self.scroll + inner.height as usize).min(self.text.lines.len());
        let window = Text::from(self.text.lines[self.scroll..end].to_vec());
        let mut style = self.theme.text_style();
        if let Some(background) = self.background {
            style = style.bg(background);
        }
        frame.render_widget(Paragraph::new(window).block(block).style(style), area);
    }
}

impl EventHandler for FileView {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = self.last_height.max(1) as isize;
        match event {
            TuiEvent::Up => self.scroll_by(-1),
            TuiEvent::Down => self.scroll_by(1),
            TuiEvent::PageUp => self.scroll_by(-page),
            TuiEvent::PageDown => self.scroll_by(page),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::highlight;
    use crate::tui::theme::THEMES;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::Path;

    #[test]
    fn test_show_resets_scroll() {
        let mut preview = FileView::new(&THEMES[0]);
        let long = (0..30).map(|i| format!("line {i}\n")).collect::<String>();
        preview.show(
            "big.txt",
            highlight::colorize(Path::new("big.txt"), "", &long, THEMES[0].highlight),
        );

        let backend = TestBackend::new(20, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| preview.render(f, f.area())).unwrap();
        preview.handle_event(&TuiEvent::PageDown);
        assert!(preview.scroll > 0);

        preview.show(
            "other.txt",
            highlight::colorize(Path::new("other.txt"), "", "tiny\n", THEMES[0].highlight),
        );
        assert_eq!(preview.scroll, 0);
    }

    #[test]
    fn test_render_paints_scheme_background() {
        let mut preview = FileView::new(&THEMES[0]);
        let highlighted =
            highlight::colorize(Path::new("x.rs"), "", "fn main() {}\n", THEMES[0].highlight);
        let expected = highlighted.background;
        assert!(expected.is_some());
        preview.show("x.rs", highlighted);

        let backend = TestBackend::new(30, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| preview.render(f, f.area())).unwrap();
        let cell = &terminal.backend().buffer()[(1, 1)];
        assert_eq!(cell.style().bg, expected);
    }
}
