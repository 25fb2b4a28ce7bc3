//! # Syntax highlighting
//!
//! Adapter between syntect and ratatui for the file preview. Syntax and
//! theme sets are loaded from syntect's bundled defaults once, on first
//! use, and shared for the whole session.
//!
//! Detection is forgiving: extension first, then the file name itself
//! (catches `Makefile` and friends), then shebang-style first lines.
//! Anything unrecognized renders as plain text rather than failing.

use std::path::Path;
use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// A file rendered for the preview pane.
pub struct Highlighted {
    pub text: Text<'static>,
    /// The scheme's canvas color, painted behind the text.
    pub background: Option<Color>,
}

/// Highlight `content` as the file at `path`. `sample_line` is the first
/// line cached when the tree listed the file, used for shebang detection.
pub fn colorize(path: &Path, sample_line: &str, content: &str, theme_key: &str) -> Highlighted {
    let Some(theme) = THEME_SET.themes.get(theme_key) else {
        log::warn!("Unknown highlight theme {theme_key}, rendering plain");
        return Highlighted {
            text: raw_text(content),
            background: None,
        };
    };

    let syntax = detect_syntax(path, sample_line, content);
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(content) {
        match highlighter.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => lines.push(styled_line(&ranges)),
            Err(e) => {
                log::debug!("Highlighting gave up on a line: {e}");
                lines.push(Line::from(line.trim_end_matches('\n').to_string()));
            }
        }
    }

    Highlighted {
        text: Text::from(lines),
        background: theme.settings.background.map(to_color),
    }
}

fn detect_syntax(path: &Path, sample_line: &str, content: &str) -> &'static SyntaxReference {
    if let Some(syntax) = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| SYNTAX_SET.find_syntax_by_extension(ext))
    {
        return syntax;
    }
    // Files like Makefile register their whole name as an extension.
    if let Some(syntax) = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| SYNTAX_SET.find_syntax_by_extension(name))
    {
        return syntax;
    }
    if let Some(syntax) = SYNTAX_SET.find_syntax_by_first_line(sample_line) {
        return syntax;
    }
    let first_line = content.lines().next().unwrap_or_default();
    SYNTAX_SET
        .find_syntax_by_first_line(first_line)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

fn styled_line(ranges: &[(syntect::highlighting::Style, &str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = ranges
        .iter()
        .map(|&(style, fragment)| {
            Span::styled(fragment.trim_end_matches('\n').to_string(), to_style(style))
        })
        .collect();
    Line::from(spans)
}

fn raw_text(content: &str) -> Text<'static> {
    Text::from(
        content
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect::<Vec<_>>(),
    )
}

fn to_style(style: syntect::highlighting::Style) -> Style {
    let mut out = Style::default().fg(to_color(style.foreground));
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

fn to_color(color: syntect::highlighting::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OCEAN: &str = "base16-ocean.dark";

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_rust_source_gets_multiple_spans() {
        let highlighted = colorize(Path::new("main.rs"), "", "fn main() {}\n", OCEAN);
        assert_eq!(highlighted.text.lines.len(), 1);
        assert!(highlighted.text.lines[0].spans.len() > 1);
        assert_eq!(line_text(&highlighted.text.lines[0]), "fn main() {}");
        assert!(highlighted.background.is_some());
    }

    #[test]
    fn test_shebang_detection_without_extension() {
        let content = "#!/bin/bash\necho hi\n";
        let highlighted = colorize(Path::new("deploy"), "#!/bin/bash", content, OCEAN);
        assert_eq!(highlighted.text.lines.len(), 2);
        assert!(highlighted.text.lines[1].spans.len() > 1);
    }

    #[test]
    fn test_unrecognized_file_renders_plain_and_intact() {
        let content = "just some words\nand a second line\n";
        let highlighted = colorize(Path::new("notes.qqq"), "just some words", content, OCEAN);
        assert_eq!(highlighted.text.lines.len(), 2);
        for (line, expected) in highlighted.text.lines.iter().zip(content.lines()) {
            assert_eq!(line.spans.len(), 1);
            assert_eq!(line_text(line), expected);
        }
    }

    #[test]
    fn test_unknown_theme_falls_back_to_raw() {
        let highlighted = colorize(Path::new("main.rs"), "", "fn main() {}\n", "no-such-theme");
        assert_eq!(highlighted.text.lines.len(), 1);
        assert_eq!(highlighted.text.lines[0].spans.len(), 1);
        assert_eq!(highlighted.text.lines[0].spans[0].style, Style::default());
        assert!(highlighted.background.is_none());
    }
}
