//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. Core
//! state mutation goes through `update`; this loop performs the effects
//! the reducer hands back (spawning runs, listing directories, reading
//! preview files, seeding editors).
//!
//! ## Redraw Strategy
//!
//! The loop redraws only after input events or finished subprocess runs.
//! Idle, it sleeps in 100ms polls without touching the terminal.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous
//! redraws.

mod component;
mod components;
mod event;
pub mod highlight;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::focus::{self, Focus, NavKey};
use crate::core::state::App;
use crate::core::tree::NodeId;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AreaEditor, EditorEvent, FieldEditor, FileTreeState, FileView, OutputView,
};
use crate::tui::event::{TuiEvent, poll_event, poll_event_immediate};
use crate::tui::theme::Theme;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub theme: &'static Theme,
    // Persistent component states
    pub options_field: FieldEditor,
    pub argument_field: FieldEditor,
    pub area_editor: AreaEditor,
    pub file_tree: FileTreeState,
    pub output_view: OutputView,
    pub file_view: FileView,
}

impl TuiState {
    pub fn new(theme: &'static Theme) -> Self {
        Self {
            theme,
            options_field: FieldEditor::new("<command options>", theme),
            argument_field: FieldEditor::new("<positional arguments>", theme),
            area_editor: AreaEditor::new(theme),
            file_tree: FileTreeState::default(),
            output_view: OutputView::new(theme),
            file_view: FileView::new(theme),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable Kitty keyboard protocol unconditionally (allows Shift+Enter
        // detection). Detection via supports_keyboard_enhancement() fails in
        // WSL, but the protocol is harmlessly ignored by terminals that
        // don't support it
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// What an input event asks of the outer loop.
enum LoopSignal {
    Continue,
    Quit,
    /// Quit and print the finished command line on the caller's terminal.
    Commit(String),
}

/// Run the composer session. Returns the committed command line, or `None`
/// when the session was quit without committing.
pub fn run(mut app: App, theme: &'static Theme) -> std::io::Result<Option<String>> {
    let mut tui = TuiState::new(theme);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background runs
    let (tx, rx) = mpsc::channel();

    let mut committed = None;
    let mut needs_redraw = true; // Force first frame

    loop {
        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event();

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match handle_event(&event, &mut app, &mut tui, &tx) {
                LoopSignal::Continue => {}
                LoopSignal::Quit => should_quit = true,
                LoopSignal::Commit(line) => {
                    info!("Committing: {line}");
                    committed = Some(line);
                    should_quit = true;
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle finished subprocess runs
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            perform_effect(effect, &mut app, &mut tui, &tx);
        }
    }

    ratatui::restore();
    Ok(committed)
}

fn handle_event(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
) -> LoopSignal {
    // Resize just needs a redraw (already flagged)
    if matches!(event, TuiEvent::Resize) {
        return LoopSignal::Continue;
    }

    // Ctrl+C always quits regardless of focus
    if matches!(event, TuiEvent::ForceQuit) {
        update(app, Action::Quit);
        return LoopSignal::Quit;
    }

    // Ctrl+S commits from anywhere
    if matches!(event, TuiEvent::Commit) {
        if let Effect::Commit(line) = update(app, Action::Commit) {
            return LoopSignal::Commit(line);
        }
        return LoopSignal::Continue;
    }

    // Navigation table first; keys it declines belong to the focused widget
    if let Some(key) = nav_key(event)
        && let Some(action) = focus::route(app.focus, key)
    {
        let effect = update(app, action);
        perform_effect(effect, app, tui, tx);
        return LoopSignal::Continue;
    }

    forward_to_focused(event, app, tui, tx);
    LoopSignal::Continue
}

fn nav_key(event: &TuiEvent) -> Option<NavKey> {
    match event {
        TuiEvent::Tab => Some(NavKey::Tab),
        TuiEvent::BackTab => Some(NavKey::BackTab),
        TuiEvent::Enter { modified: false } => Some(NavKey::Enter),
        TuiEvent::Enter { modified: true } => Some(NavKey::ModifiedEnter),
        TuiEvent::Esc => Some(NavKey::Esc),
        TuiEvent::Up => Some(NavKey::Up),
        TuiEvent::Down => Some(NavKey::Down),
        TuiEvent::Expand => Some(NavKey::Open),
        TuiEvent::QuoteToggle => Some(NavKey::Quote),
        _ => None,
    }
}

/// Text-editing keys go to whichever surface holds focus. Editor changes
/// feed back into the expression through the reducer, which re-evaluates.
fn forward_to_focused(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
) {
    match app.focus {
        Focus::Options => {
            if tui.options_field.handle_event(event) == Some(EditorEvent::Changed) {
                let text = tui.options_field.text().to_string();
                let effect = update(app, Action::OptionsEdited(text));
                perform_effect(effect, app, tui, tx);
            }
        }
        Focus::Arguments => {
            if tui.argument_field.handle_event(event) == Some(EditorEvent::Changed) {
                let text = tui.argument_field.text().to_string();
                let effect = update(app, Action::ArgumentEdited(text));
                perform_effect(effect, app, tui, tx);
            }
        }
        Focus::ArgumentsWide => {
            if tui.area_editor.handle_event(event) == Some(EditorEvent::Changed) {
                let text = tui.area_editor.text().to_string();
                let effect = update(app, Action::ArgumentEdited(text));
                perform_effect(effect, app, tui, tx);
            }
        }
        Focus::Output => {
            tui.output_view.handle_event(event);
        }
        Focus::FileView => {
            tui.file_view.handle_event(event);
        }
        Focus::FileSummary | Focus::FileTree => {}
    }
}

fn perform_effect(effect: Effect, app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) {
    match effect {
        Effect::Evaluate => schedule_run(app, tui, tx),
        Effect::LoadChildren(id) => {
            if let Err(e) = app.tree.load_children(id) {
                warn!("Failed to list {}: {}", app.tree.node(id).path.display(), e);
            }
        }
        Effect::Preview(id) => open_preview(id, app, tui),
        Effect::SeedWideEditor => tui.area_editor.load(app.expression.argument()),
        Effect::SeedNarrowEditor => tui.argument_field.load(app.expression.argument()),
        Effect::ShowOutput => tui.output_view.set_text(&app.output),
        // Quit and Commit are loop signals, handled before this point
        Effect::None | Effect::Quit | Effect::Commit(_) => {}
    }
}

/// Spawn one evaluation of the current expression. The sequence number lets
/// the reducer drop results that finish after a newer run has landed.
fn schedule_run(app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) {
    let seq = app.next_seq();
    let command = app.expression.render();
    debug!("Scheduling run {}: {:?}", seq, command);
    tui.output_view.scroll_to_top();

    let runner = app.runner.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let output = runner.run(&command).await;
        let finished = Action::RunFinished {
            seq,
            text: output.display_text(),
        };
        if tx.send(finished).is_err() {
            warn!("Failed to send result of run {}: receiver dropped", seq);
        }
    });
}

/// Read and highlight the file under the cursor. On success focus moves to
/// the full-screen view; a read failure is logged and focus stays put.
fn open_preview(id: NodeId, app: &mut App, tui: &mut TuiState) {
    let node = app.tree.node(id);
    match std::fs::read(&node.path) {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes);
            let highlighted =
                highlight::colorize(&node.path, &node.sample_line, &content, tui.theme.highlight);
            tui.file_view.show(&app.tree.display_path(id), highlighted);
            app.focus = Focus::FileView;
        }
        Err(e) => {
            warn!("Failed to read {}: {}", node.path.display(), e);
        }
    }
}
