//! # Actions
//!
//! Everything that can happen in Fiddle becomes an `Action`.
//! User types in the options field? That's `Action::OptionsEdited(text)`.
//! A shell run finishes? That's `Action::RunFinished { seq, text }`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the new state. No side effects here. I/O happens elsewhere:
//! `update()` hands back an [`Effect`] and the event loop performs it.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: `assert_eq!(update(state, action), effect)`.
//! And debuggable: log every action, replay the exact session.

use crate::core::focus::Focus;
use crate::core::state::App;
use crate::core::tree::{Listing, NodeId};

/// State transitions. Produced by `focus::route()` for navigation keys and
/// by the TUI widgets for edits and background results.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move focus without touching the output return target.
    SetFocus(Focus),
    /// Move focus to the output pane, remembering where to come back to.
    InspectOutput,
    /// Leave the output pane for wherever inspection started.
    LeaveOutput,
    ExpandArgumentEditor,
    CollapseArgumentEditor,
    ToggleQuoteStyle,
    /// The options field changed; the payload is the full field text.
    OptionsEdited(String),
    /// The positional argument changed; the payload is the full text.
    ArgumentEdited(String),
    TreeCursorUp,
    TreeCursorDown,
    /// Enter on the tree cursor: expand/collapse a directory or toggle a
    /// file's selection.
    ActivateTreeNode,
    /// Open the file under the tree cursor in the full-screen preview.
    OpenPreview,
    ClosePreview,
    /// A scheduled shell run completed. `seq` orders results; `text` is the
    /// display text (stdout, or stderr plus the error).
    RunFinished { seq: u64, text: String },
    /// Print the composed command and leave the session.
    Commit,
    Quit,
}

/// Side effects requested by `update()`. The event loop owns all I/O, so
/// the reducer stays a pure function of state and action.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Run the current expression through the shell.
    Evaluate,
    /// List a directory's entries off the reducer's back.
    LoadChildren(NodeId),
    /// Read and highlight a file for the full-screen preview.
    Preview(NodeId),
    /// Load the expanded editor with the current argument text.
    SeedWideEditor,
    /// Load the single-line field with the current argument text.
    SeedNarrowEditor,
    /// Push `app.output` into the output pane and scroll it to the top.
    ShowOutput,
    /// Leave the session, printing the rendered command line.
    Commit(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SetFocus(focus) => {
            app.focus = focus;
            Effect::None
        }
        Action::InspectOutput => {
            // Only editing surfaces are worth returning to; inspection from
            // elsewhere keeps the previous return target.
            if app.focus.is_editing_surface() {
                app.return_focus = app.focus;
            }
            app.focus = Focus::Output;
            Effect::None
        }
        Action::LeaveOutput => {
            app.focus = app.return_focus;
            Effect::None
        }
        Action::ExpandArgumentEditor => {
            app.focus = Focus::ArgumentsWide;
            Effect::SeedWideEditor
        }
        Action::CollapseArgumentEditor => {
            app.focus = Focus::Arguments;
            Effect::SeedNarrowEditor
        }
        Action::ToggleQuoteStyle => {
            // The rendered string changes but the last evaluation stands;
            // results are quote-insensitive for well-formed input.
            app.expression.toggle_quote_style();
            Effect::None
        }
        Action::OptionsEdited(text) => {
            app.expression.set_options(text);
            Effect::Evaluate
        }
        Action::ArgumentEdited(text) => {
            app.expression.set_argument(text);
            Effect::Evaluate
        }
        Action::TreeCursorUp => {
            app.tree.cursor_up();
            Effect::None
        }
        Action::TreeCursorDown => {
            app.tree.cursor_down();
            Effect::None
        }
        Action::ActivateTreeNode => activate_cursor_node(app),
        Action::OpenPreview => {
            let Some(id) = app.tree.cursor_node() else {
                return Effect::None;
            };
            if app.tree.is_root(id) || app.tree.node(id).is_dir {
                return Effect::None;
            }
            Effect::Preview(id)
        }
        Action::ClosePreview => {
            app.focus = Focus::FileTree;
            Effect::None
        }
        Action::RunFinished { seq, text } => {
            if seq <= app.applied_run_seq {
                log::debug!(
                    "Dropping stale run result (seq {seq}, already applied {})",
                    app.applied_run_seq
                );
                return Effect::None;
            }
            app.applied_run_seq = seq;
            app.output = text;
            Effect::ShowOutput
        }
        Action::Commit => Effect::Commit(app.expression.render()),
        Action::Quit => Effect::Quit,
    }
}

/// Enter on the tree. Directories list once then toggle; files toggle their
/// selection in the expression. The root row does nothing.
fn activate_cursor_node(app: &mut App) -> Effect {
    let Some(id) = app.tree.cursor_node() else {
        return Effect::None;
    };
    if app.tree.is_root(id) {
        return Effect::None;
    }
    let node = app.tree.node(id);
    if node.is_dir {
        match node.listing {
            Listing::NotLoaded => Effect::LoadChildren(id),
            Listing::Loaded => {
                app.tree.toggle_expanded(id);
                Effect::None
            }
            // One listing attempt per node; a failed directory stays closed.
            Listing::Failed => Effect::None,
        }
    } else {
        let path = app.tree.display_path(id);
        app.expression.toggle_file(&path);
        Effect::Evaluate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expression::QuoteStyle;
    use crate::test_support::test_app;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_output_round_trips_to_editing_surface() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(dir.path());
        app.focus = Focus::Arguments;

        assert_eq!(update(&mut app, Action::InspectOutput), Effect::None);
        assert_eq!(app.focus, Focus::Output);
        assert_eq!(app.return_focus, Focus::Arguments);

        assert_eq!(update(&mut app, Action::LeaveOutput), Effect::None);
        assert_eq!(app.focus, Focus::Arguments);
    }

    #[test]
    fn test_viewing_output_from_summary_keeps_return_target() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(dir.path());
        app.focus = Focus::FileSummary;

        update(&mut app, Action::SetFocus(Focus::Output));
        assert_eq!(app.focus, Focus::Output);
        assert_eq!(app.return_focus, Focus::Options);

        update(&mut app, Action::LeaveOutput);
        assert_eq!(app.focus, Focus::Options);
    }

    #[test]
    fn test_edits_request_evaluation() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(dir.path());

        let effect = update(&mut app, Action::OptionsEdited("-n".to_string()));
        assert_eq!(effect, Effect::Evaluate);
        assert_eq!(app.expression.options(), "-n");

        let effect = update(&mut app, Action::ArgumentEdited("foo".to_string()));
        assert_eq!(effect, Effect::Evaluate);
        assert_eq!(app.expression.render(), "grep -n -- 'foo' ");
    }

    #[test]
    fn test_quote_toggle_does_not_reevaluate() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(dir.path());

        let effect = update(&mut app, Action::ToggleQuoteStyle);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.expression.quote_style(), QuoteStyle::Double);
    }

    #[test]
    fn test_activate_file_toggles_selection() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a\n").unwrap();
        let mut app = test_app(dir.path());
        app.tree.cursor_down();

        assert_eq!(update(&mut app, Action::ActivateTreeNode), Effect::Evaluate);
        assert_eq!(app.expression.selected_files(), ["a.txt"]);

        assert_eq!(update(&mut app, Action::ActivateTreeNode), Effect::Evaluate);
        assert!(app.expression.selected_files().is_empty());
    }

    #[test]
    fn test_activate_directory_lists_once_then_toggles() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inner.txt"), "x\n").unwrap();
        let mut app = test_app(dir.path());
        app.tree.cursor_down();
        let (sub_id, _) = app.tree.visible_rows()[1];

        assert_eq!(
            update(&mut app, Action::ActivateTreeNode),
            Effect::LoadChildren(sub_id)
        );
        app.tree.load_children(sub_id).unwrap();
        assert!(app.tree.node(sub_id).expanded);

        assert_eq!(update(&mut app, Action::ActivateTreeNode), Effect::None);
        assert!(!app.tree.node(sub_id).expanded);
    }

    #[test]
    fn test_activate_root_is_a_noop() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a\n").unwrap();
        let mut app = test_app(dir.path());

        assert_eq!(update(&mut app, Action::ActivateTreeNode), Effect::None);
        assert!(app.expression.selected_files().is_empty());
    }

    #[test]
    fn test_preview_requested_only_for_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("z.txt"), "z\n").unwrap();
        let mut app = test_app(dir.path());

        assert_eq!(update(&mut app, Action::OpenPreview), Effect::None);

        app.tree.cursor_down();
        assert_eq!(update(&mut app, Action::OpenPreview), Effect::None);

        app.tree.cursor_down();
        let (file_id, _) = app.tree.visible_rows()[2];
        assert_eq!(update(&mut app, Action::OpenPreview), Effect::Preview(file_id));
    }

    #[test]
    fn test_stale_run_results_are_dropped() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(dir.path());
        app.next_seq();
        app.next_seq();

        let effect = update(
            &mut app,
            Action::RunFinished {
                seq: 2,
                text: "second".to_string(),
            },
        );
        assert_eq!(effect, Effect::ShowOutput);
        assert_eq!(app.output, "second");

        // The first run finished late: its result must not clobber the
        // newer one.
        let effect = update(
            &mut app,
            Action::RunFinished {
                seq: 1,
                text: "first".to_string(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.output, "second");
    }

    #[test]
    fn test_expand_and_collapse_argument_editor() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(dir.path());
        app.focus = Focus::Arguments;

        assert_eq!(
            update(&mut app, Action::ExpandArgumentEditor),
            Effect::SeedWideEditor
        );
        assert_eq!(app.focus, Focus::ArgumentsWide);

        assert_eq!(
            update(&mut app, Action::CollapseArgumentEditor),
            Effect::SeedNarrowEditor
        );
        assert_eq!(app.focus, Focus::Arguments);
    }

    #[test]
    fn test_commit_carries_the_rendered_command() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a\n").unwrap();
        let mut app = test_app(dir.path());
        update(&mut app, Action::OptionsEdited("-i".to_string()));
        update(&mut app, Action::ArgumentEdited("hello".to_string()));
        app.tree.cursor_down();
        update(&mut app, Action::ActivateTreeNode);

        assert_eq!(
            update(&mut app, Action::Commit),
            Effect::Commit("grep -i -- 'hello' a.txt".to_string())
        );
    }

    #[test]
    fn test_close_preview_returns_to_tree() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(dir.path());
        app.focus = Focus::FileView;

        assert_eq!(update(&mut app, Action::ClosePreview), Effect::None);
        assert_eq!(app.focus, Focus::FileTree);
    }
}
