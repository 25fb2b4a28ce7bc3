//! # Focus controller
//!
//! Which surface owns the keyboard, and the key-driven transitions between
//! surfaces. The transition table is a pure function so every row can be
//! tested without a terminal; the reducer applies whatever action a row
//! produces.
//!
//! Text-editing keys never reach this table; the event loop forwards them
//! to the focused editor after the table declines them.

use crate::core::action::Action;

/// The editing and viewing surfaces. Exactly one holds focus at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Options,
    /// Narrow single-line argument editor in the command bar.
    Arguments,
    /// Expanded multi-line argument editor.
    ArgumentsWide,
    FileSummary,
    FileTree,
    Output,
    FileView,
}

impl Focus {
    /// True for the surfaces Output remembers as its Escape return target.
    pub fn is_editing_surface(self) -> bool {
        matches!(
            self,
            Focus::Options | Focus::Arguments | Focus::ArgumentsWide
        )
    }
}

/// Navigation keys the transition table understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Tab,
    BackTab,
    Enter,
    /// Enter with Ctrl or Shift held.
    ModifiedEnter,
    Esc,
    Up,
    Down,
    /// Ctrl+O: expand/collapse the argument editor, open/close a preview.
    Open,
    /// Ctrl+Space: quote-style toggle.
    Quote,
}

/// The transition table. `None` means the key is a no-op here or belongs to
/// the focused editor (plain Enter in the wide editor inserts a newline;
/// Up/Down in the read-only views scroll).
pub fn route(focus: Focus, key: NavKey) -> Option<Action> {
    use Focus::*;
    match (focus, key) {
        (Options, NavKey::Tab) => Some(Action::SetFocus(Arguments)),
        (Options, NavKey::BackTab) => Some(Action::SetFocus(FileTree)),
        (Options, NavKey::Enter) => Some(Action::InspectOutput),

        (Arguments, NavKey::Tab) => Some(Action::SetFocus(FileSummary)),
        (Arguments, NavKey::BackTab) => Some(Action::SetFocus(Options)),
        (Arguments, NavKey::Enter) => Some(Action::InspectOutput),
        (Arguments, NavKey::Open) => Some(Action::ExpandArgumentEditor),
        (Arguments, NavKey::Quote) => Some(Action::ToggleQuoteStyle),

        (ArgumentsWide, NavKey::Open | NavKey::Esc) => Some(Action::CollapseArgumentEditor),
        (ArgumentsWide, NavKey::ModifiedEnter) => Some(Action::InspectOutput),

        (FileSummary, NavKey::Tab) => Some(Action::SetFocus(Options)),
        (FileSummary, NavKey::BackTab) => Some(Action::SetFocus(Arguments)),
        (FileSummary, NavKey::Down) => Some(Action::SetFocus(FileTree)),
        // Enter inspects output without touching the return target.
        (FileSummary, NavKey::Enter) => Some(Action::SetFocus(Output)),

        (FileTree, NavKey::Tab) => Some(Action::SetFocus(Options)),
        (FileTree, NavKey::BackTab | NavKey::Esc) => Some(Action::SetFocus(Arguments)),
        (FileTree, NavKey::Up) => Some(Action::TreeCursorUp),
        (FileTree, NavKey::Down) => Some(Action::TreeCursorDown),
        (FileTree, NavKey::Enter) => Some(Action::ActivateTreeNode),
        (FileTree, NavKey::Open) => Some(Action::OpenPreview),

        (Output, NavKey::Esc) => Some(Action::LeaveOutput),

        (FileView, NavKey::Open | NavKey::Esc) => Some(Action::ClosePreview),

        _ => None,
    }
}
