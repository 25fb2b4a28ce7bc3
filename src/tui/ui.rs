//! Frame layout and drawing.
//!
//! One of three screens is drawn per frame, derived from focus alone:
//! the composer (command bar over output and file picker), the expanded
//! argument editor, or the full-screen file preview. `draw_ui` is the
//! single entry point; the event loop never draws panels directly.

use crate::core::expression::FILE_SUMMARY_PLACEHOLDER;
use crate::core::focus::Focus;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::FileTreeView;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

/// Matches the width of the `<command options>` placeholder.
const OPTIONS_FIELD_WIDTH: u16 = 17;

const KEY_HINTS: &str =
    "Tab fields · Enter output · C-Space quotes · C-o editor · C-s print · C-c quit";

/// Which of the three screens the current focus implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Composer,
    Expanded,
    FileView,
}

pub fn screen(app: &App) -> Screen {
    if app.focus == Focus::FileView {
        return Screen::FileView;
    }
    // Inspecting output from the wide editor keeps the expanded screen up
    // so Esc returns the user to the view they left.
    if app.focus == Focus::ArgumentsWide
        || (app.focus == Focus::Output && app.return_focus == Focus::ArgumentsWide)
    {
        return Screen::Expanded;
    }
    Screen::Composer
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    // Sync focus props before drawing
    tui.options_field.focused = app.focus == Focus::Options;
    tui.argument_field.focused = app.focus == Focus::Arguments;
    tui.area_editor.focused = app.focus == Focus::ArgumentsWide;
    tui.output_view.focused = app.focus == Focus::Output;

    match screen(app) {
        Screen::FileView => tui.file_view.render(frame, frame.area()),
        Screen::Expanded => draw_expanded(frame, app, tui),
        Screen::Composer => draw_composer(frame, app, tui),
    }
}

fn draw_composer(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Fill, Length, Min};

    let outer = tui.theme.panel_block("fiddle", true);
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let [bar_area, hint_area, main_area] =
        Layout::vertical([Length(1), Length(1), Min(0)]).areas(inner);

    draw_expression_bar(frame, app, tui, bar_area);
    frame.render_widget(Span::styled(KEY_HINTS, tui.theme.hint_style()), hint_area);

    let [output_area, tree_area] = Layout::horizontal([Fill(5), Fill(1)]).areas(main_area);
    tui.output_view.render(frame, output_area);

    let mut tree = FileTreeView {
        state: &mut tui.file_tree,
        tree: &app.tree,
        expression: &app.expression,
        focused: app.focus == Focus::FileTree,
        theme: tui.theme,
    };
    tree.render(frame, tree_area);
}

/// The command bar mirrors `Expression::render` piece by piece: label,
/// options, separator, quoted argument, separator, file suffix.
fn draw_expression_bar(frame: &mut Frame, app: &App, tui: &mut TuiState, area: Rect) {
    use Constraint::{Fill, Length};

    let expression = &app.expression;
    let label = format!("> {} ", expression.program_name());
    let sep1 = expression.options_separator();
    let sep2 = expression.argument_separator();
    let quote = expression.quote_style().ch().to_string();

    let [label_area, options_area, sep1_area, open_quote_area, argument_area, close_quote_area, sep2_area, summary_area] =
        Layout::horizontal([
            Length(label.len() as u16),
            Length(OPTIONS_FIELD_WIDTH),
            Length(sep1.len() as u16),
            Length(1),
            argument_field_constraint(expression.argument().chars().count()),
            Length(1),
            Length(sep2.len() as u16),
            Fill(1),
        ])
        .areas(area);

    let accent = Style::default()
        .fg(tui.theme.frame)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Span::styled(label, accent), label_area);

    tui.options_field.render(frame, options_area);
    frame.render_widget(Span::styled(sep1, tui.theme.text_style()), sep1_area);
    frame.render_widget(Span::styled(quote.clone(), tui.theme.text_style()), open_quote_area);
    tui.argument_field.render(frame, argument_area);
    frame.render_widget(Span::styled(quote, tui.theme.text_style()), close_quote_area);
    frame.render_widget(Span::styled(sep2, tui.theme.text_style()), sep2_area);

    let summary = expression.file_summary();
    let mut summary_style = if summary == FILE_SUMMARY_PLACEHOLDER {
        tui.theme.hint_style()
    } else {
        tui.theme.text_style()
    };
    if app.focus == Focus::FileSummary {
        summary_style = summary_style.add_modifier(Modifier::UNDERLINED);
    }
    frame.render_widget(Span::styled(summary, summary_style), summary_area);
}

fn draw_expanded(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::Fill;

    let [editor_area, output_area] = Layout::vertical([Fill(1), Fill(1)]).areas(frame.area());

    let editor_focused = app.focus == Focus::ArgumentsWide;
    let block = tui.theme.panel_block("Positional arguments", editor_focused);
    let editor_inner = block.inner(editor_area);
    frame.render_widget(block, editor_area);
    tui.area_editor.render(frame, editor_inner);

    tui.output_view.render(frame, output_area);
}

/// The narrow argument field starts at the placeholder's width and widens
/// in two steps as the text grows, taking share from the file summary.
fn argument_field_constraint(chars: usize) -> Constraint {
    if chars < 19 {
        Constraint::Length(22)
    } else if chars < 40 {
        Constraint::Fill(7)
    } else {
        Constraint::Fill(22)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use crate::tui::theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn test_tui() -> TuiState {
        TuiState::new(theme::lookup("ocean").unwrap())
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_screen_follows_focus() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        assert_eq!(screen(&app), Screen::Composer);

        app.focus = Focus::ArgumentsWide;
        assert_eq!(screen(&app), Screen::Expanded);

        app.focus = Focus::FileView;
        assert_eq!(screen(&app), Screen::FileView);

        app.focus = Focus::Output;
        app.return_focus = Focus::ArgumentsWide;
        assert_eq!(screen(&app), Screen::Expanded);

        app.return_focus = Focus::Options;
        assert_eq!(screen(&app), Screen::Composer);
    }

    #[test]
    fn test_argument_field_widens_in_tiers() {
        assert_eq!(argument_field_constraint(0), Constraint::Length(22));
        assert_eq!(argument_field_constraint(18), Constraint::Length(22));
        assert_eq!(argument_field_constraint(19), Constraint::Fill(7));
        assert_eq!(argument_field_constraint(39), Constraint::Fill(7));
        assert_eq!(argument_field_constraint(40), Constraint::Fill(22));
    }

    #[test]
    fn test_composer_bar_shows_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());
        let mut tui = test_tui();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let bar = row_text(&terminal, 1);
        assert!(bar.contains("> grep "), "bar was: {bar:?}");
        assert!(bar.contains("<command options>"), "bar was: {bar:?}");
        assert!(bar.contains("-- '<positional arguments>'"), "bar was: {bar:?}");
        assert!(bar.contains("<input files>"), "bar was: {bar:?}");
    }

    #[test]
    fn test_composer_bar_tracks_edits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        update(&mut app, Action::OptionsEdited("-n".to_string()));
        update(&mut app, Action::ArgumentEdited("foo".to_string()));
        let mut tui = test_tui();
        tui.options_field.load(app.expression.options());
        tui.argument_field.load(app.expression.argument());

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let bar = row_text(&terminal, 1);
        assert!(bar.contains("> grep -n"), "bar was: {bar:?}");
        assert!(bar.contains("-- 'foo"), "bar was: {bar:?}");
    }

    #[test]
    fn test_composer_panels_present() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());
        let mut tui = test_tui();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        assert!(row_text(&terminal, 0).contains(" fiddle "));
        assert!(row_text(&terminal, 3).contains(" Output "));
        assert!(row_text(&terminal, 3).contains(" Files "));
    }

    #[test]
    fn test_expanded_screen_stacks_editor_over_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.focus = Focus::ArgumentsWide;
        let mut tui = test_tui();
        tui.area_editor.load("line one\nline two");

        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        assert!(row_text(&terminal, 0).contains(" Positional arguments "));
        assert!(row_text(&terminal, 1).contains("line one"));
        assert!(row_text(&terminal, 10).contains(" Output "));
    }

    #[test]
    fn test_file_view_takes_whole_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.focus = Focus::FileView;
        let mut tui = test_tui();

        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        assert!(!row_text(&terminal, 0).contains(" fiddle "));
    }
}
