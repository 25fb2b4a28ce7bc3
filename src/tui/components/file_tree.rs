//! # FileTree Component
//!
//! Scrollable view over the lazy directory tree. Directories carry an
//! expansion marker, selected files stand out in the accent color, and a
//! directory whose listing failed is flagged inline instead of vanishing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::core::expression::Expression;
use crate::core::tree::{FileTree, Listing, TreeNode};
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Persistent presentation state: the list widget's scroll position.
#[derive(Default)]
pub struct FileTreeState {
    pub list_state: ListState,
}

/// Scrollable tree view component.
/// Created fresh each frame with references to state and data.
pub struct FileTreeView<'a> {
    pub state: &'a mut FileTreeState,
    pub tree: &'a FileTree,
    pub expression: &'a Expression,
    pub focused: bool,
    pub theme: &'static Theme,
}

impl<'a> Component for FileTreeView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .tree
            .visible_rows()
            .into_iter()
            .map(|(id, depth)| {
                let node = self.tree.node(id);
                let selected =
                    !node.is_dir && self.expression.is_selected(&self.tree.display_path(id));
                ListItem::new(row_line(node, depth, selected, self.theme))
            })
            .collect();

        // The cursor row only reads as a cursor while the pane has focus.
        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(self.theme.panel_block("Files", self.focused))
            .highlight_style(highlight);

        self.state.list_state.select(Some(self.tree.cursor()));
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn row_line(node: &TreeNode, depth: usize, selected: bool, theme: &Theme) -> Line<'static> {
    let indent = "  ".repeat(depth);
    if node.is_dir {
        let marker = if node.expanded && node.listing == Listing::Loaded {
            "▾ "
        } else {
            "▸ "
        };
        let mut spans = vec![Span::styled(
            format!("{indent}{marker}{}", node.name),
            Style::default().fg(theme.directory),
        )];
        if node.listing == Listing::Failed {
            spans.push(Span::styled(
                " (unreadable)",
                Style::default().fg(theme.error),
            ));
        }
        Line::from(spans)
    } else {
        let style = if selected {
            Style::default()
                .fg(theme.selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        Line::from(Span::styled(format!("{indent}{}", node.name), style))
    }
}
