//! # Output Component
//!
//! Shows the latest evaluation result. Programs under a pty-less shell
//! still emit color when forced to, so escape sequences are translated to
//! ratatui styles rather than shown raw.
//!
//! Content is unbounded (a grep over a large tree can return megabytes),
//! so rendering slices the visible window out of the cached lines instead
//! of handing the whole text to the widget every frame.

use ansi_to_tui::IntoText;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

pub struct OutputView {
    text: Text<'static>,
    /// First visible line.
    scroll: usize,
    /// Viewport height from the last draw, for paging and clamping.
    last_height: u16,
    /// Whether the pane has focus (Prop)
    pub focused: bool,
    theme: &'static Theme,
}

impl OutputView {
    pub fn new(theme: &'static Theme) -> Self {
        Self {
            text: Text::default(),
            scroll: 0,
            last_height: 0,
            focused: false,
            theme,
        }
    }

    /// Replace the content. Escape sequences in `raw` become styles; a
    /// stream the parser rejects is shown literally instead.
    pub fn set_text(&mut self, raw: &str) {
        self.text = match raw.into_text() {
            Ok(text) => text,
            Err(e) => {
                log::debug!("ANSI translation failed, showing raw text: {e}");
                Text::from(
                    raw.lines()
                        .map(|line| Line::from(line.to_string()))
                        .collect::<Vec<_>>(),
                )
            }
        };
        self.clamp_scroll();
    }

    pub fn line_count(&self) -> usize {
        self.text.lines.len()
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.line_count()
            .saturating_sub(self.last_height.max(1) as usize)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn scroll_by(&mut self, delta: isize) -> Option<()> {
        let target = (self.scroll as isize + delta).clamp(0, self.max_scroll() as isize) as usize;
        (target != self.scroll).then(|| {
            self.scroll = target;
        })
    }
}

impl Component for OutputView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = self.theme.panel_block("Output", self.focused);
        let inner = block.inner(area);
        self.last_height = inner.height;
        self.clamp_scroll();

        let end = (self.scroll + inner.height as usize).min(self.text.lines.len());
        let window = Text::from(self.text.lines[self.scroll..end].to_vec());
        frame.render_widget(
            Paragraph::new(window)
                .block(block)
                .style(self.theme.text_style()),
            area,
        );
    }
}

impl EventHandler for OutputView {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = self.last_height.max(1) as isize;
        match event {
            TuiEvent::Up => self.scroll_by(-1),
            TuiEvent::Down => self.scroll_by(1),
            TuiEvent::PageUp => self.scroll_by(-page),
            TuiEvent::PageDown => self.scroll_by(page),
            TuiEvent::Home => self.scroll_by(-(self.scroll as isize)),
            TuiEvent::End => self.scroll_by(self.max_scroll() as isize),
            _ => None,
        }
    }
}
