//! # Themes
//!
//! A theme names a syntect color scheme for file previews plus the handful
//! of chrome colors the composer draws with. Entries are compile-time
//! constants; `lookup` resolves the `--theme` flag and config value.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType};

pub struct Theme {
    pub name: &'static str,
    /// Key into syntect's default theme set, used for file previews.
    pub highlight: &'static str,
    /// Borders and panel titles.
    pub frame: Color,
    pub text: Color,
    /// Directory rows in the file tree.
    pub directory: Color,
    /// Files currently part of the expression.
    pub selected: Color,
    /// Placeholders and key hints.
    pub hint: Color,
    pub error: Color,
}

impl Theme {
    /// Bordered block shared by every panel. Unfocused panels dim their
    /// border so the active pane reads at a glance.
    pub fn panel_block(&self, title: &str, focused: bool) -> Block<'static> {
        let border_style = if focused {
            Style::default().fg(self.frame)
        } else {
            Style::default().fg(self.frame).add_modifier(Modifier::DIM)
        };
        Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" {title} "))
            .border_style(border_style)
            .title_style(border_style)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.hint).add_modifier(Modifier::DIM)
    }
}

pub static THEMES: [Theme; 7] = [
    Theme {
        name: "ocean",
        highlight: "base16-ocean.dark",
        frame: Color::Rgb(0x8f, 0xa1, 0xb3),
        text: Color::Rgb(0xc0, 0xc5, 0xce),
        directory: Color::Rgb(0x96, 0xb5, 0xb4),
        selected: Color::Rgb(0xa3, 0xbe, 0x8c),
        hint: Color::Rgb(0x65, 0x73, 0x7e),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
    },
    Theme {
        name: "eighties",
        highlight: "base16-eighties.dark",
        frame: Color::Rgb(0x66, 0x99, 0xcc),
        text: Color::Rgb(0xd3, 0xd0, 0xc8),
        directory: Color::Rgb(0x66, 0xcc, 0xcc),
        selected: Color::Rgb(0x99, 0xcc, 0x99),
        hint: Color::Rgb(0x74, 0x73, 0x69),
        error: Color::Rgb(0xf2, 0x77, 0x7a),
    },
    Theme {
        name: "mocha",
        highlight: "base16-mocha.dark",
        frame: Color::Rgb(0x8a, 0xb3, 0xb5),
        text: Color::Rgb(0xd0, 0xc8, 0xc6),
        directory: Color::Rgb(0x7b, 0xbd, 0xa4),
        selected: Color::Rgb(0xbe, 0xb5, 0x5b),
        hint: Color::Rgb(0x7e, 0x70, 0x5a),
        error: Color::Rgb(0xcb, 0x60, 0x77),
    },
    Theme {
        name: "ocean-light",
        highlight: "base16-ocean.light",
        frame: Color::Rgb(0x4f, 0x5b, 0x66),
        text: Color::Rgb(0x34, 0x3d, 0x46),
        directory: Color::Rgb(0x3b, 0x75, 0x73),
        selected: Color::Rgb(0x5d, 0x81, 0x4a),
        hint: Color::Rgb(0xa7, 0xad, 0xba),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
    },
    Theme {
        name: "github",
        highlight: "InspiredGitHub",
        frame: Color::Rgb(0x03, 0x66, 0xd6),
        text: Color::Rgb(0x24, 0x29, 0x2e),
        directory: Color::Rgb(0x00, 0x5c, 0xc5),
        selected: Color::Rgb(0x22, 0x86, 0x3a),
        hint: Color::Rgb(0x6a, 0x73, 0x7d),
        error: Color::Rgb(0xd7, 0x3a, 0x49),
    },
    Theme {
        name: "solarized-dark",
        highlight: "Solarized (dark)",
        frame: Color::Rgb(0x26, 0x8b, 0xd2),
        text: Color::Rgb(0x83, 0x94, 0x96),
        directory: Color::Rgb(0x2a, 0xa1, 0x98),
        selected: Color::Rgb(0x85, 0x99, 0x00),
        hint: Color::Rgb(0x58, 0x6e, 0x75),
        error: Color::Rgb(0xdc, 0x32, 0x2f),
    },
    Theme {
        name: "solarized-light",
        highlight: "Solarized (light)",
        frame: Color::Rgb(0x26, 0x8b, 0xd2),
        text: Color::Rgb(0x65, 0x7b, 0x83),
        directory: Color::Rgb(0x2a, 0xa1, 0x98),
        selected: Color::Rgb(0x85, 0x99, 0x00),
        hint: Color::Rgb(0x93, 0xa1, 0xa1),
        error: Color::Rgb(0xdc, 0x32, 0x2f),
    },
];

pub fn lookup(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.name == name)
}

pub fn names() -> Vec<&'static str> {
    THEMES.iter().map(|theme| theme.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_THEME;
    use syntect::highlighting::ThemeSet;

    #[test]
    fn test_default_theme_resolves() {
        assert!(lookup(DEFAULT_THEME).is_some());
        assert!(lookup("no-such-theme").is_none());
    }

    #[test]
    fn test_every_highlight_key_ships_with_syntect() {
        let theme_set = ThemeSet::load_defaults();
        for theme in &THEMES {
            assert!(
                theme_set.themes.contains_key(theme.highlight),
                "{} names a missing syntect theme {}",
                theme.name,
                theme.highlight
            );
        }
    }

    #[test]
    fn test_names_match_entries() {
        let names = names();
        assert_eq!(names.len(), THEMES.len());
        assert!(names.contains(&"ocean"));
        assert!(names.contains(&"solarized-light"));
    }
}
