//! # Expression model
//!
//! The editable fields of the composed command line and the pure `render()`
//! that assembles them. The rendered string is a deterministic function of
//! the fields; mutation happens only through the setters here, driven by
//! the reducer.
//!
//! ```text
//! grep -i -- 'pattern' src/main.rs src/lib.rs
//! └──┘ └┘ └┘ └───────┘ └───────────────────┘
//! label options marker  quoted argument body  file suffix
//! ```
//!
//! For programs that do not take an end-of-options marker before the
//! positional argument (jq, yq) the marker moves behind the quoted body.
//! When no files are selected but stdin was captured at startup, the suffix
//! becomes an input redirect to the captured buffer.

use std::path::PathBuf;

use crate::core::program::ProgramSpec;

/// Placeholder shown in the file-summary field while nothing is selected.
pub const FILE_SUMMARY_PLACEHOLDER: &str = "<input files>";

/// Quoting applied around the positional-argument body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn ch(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            QuoteStyle::Single => QuoteStyle::Double,
            QuoteStyle::Double => QuoteStyle::Single,
        }
    }
}

pub struct Expression {
    program: ProgramSpec,
    options: String,
    quote_style: QuoteStyle,
    argument: String,
    /// Insertion order is selection order; never contains duplicates.
    selected_files: Vec<String>,
    captured_stdin: Option<PathBuf>,
}

impl Expression {
    pub fn new(program: ProgramSpec, captured_stdin: Option<PathBuf>) -> Self {
        Self {
            program,
            options: String::new(),
            quote_style: QuoteStyle::default(),
            argument: String::new(),
            selected_files: Vec::new(),
            captured_stdin,
        }
    }

    pub fn program_name(&self) -> &str {
        self.program.name
    }

    pub fn uses_end_of_options_marker(&self) -> bool {
        self.program.uses_end_of_options_marker
    }

    pub fn options(&self) -> &str {
        &self.options
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }

    pub fn quote_style(&self) -> QuoteStyle {
        self.quote_style
    }

    pub fn set_options(&mut self, text: String) {
        self.options = text;
    }

    pub fn set_argument(&mut self, text: String) {
        self.argument = text;
    }

    pub fn toggle_quote_style(&mut self) {
        self.quote_style = self.quote_style.toggled();
    }

    /// Toggle membership of `path` in the selected files. Deselecting leaves
    /// the remaining paths in their existing order; re-selecting appends at
    /// the end.
    pub fn toggle_file(&mut self, path: &str) {
        match self.selected_files.iter().position(|p| p == path) {
            Some(index) => {
                self.selected_files.remove(index);
            }
            None => self.selected_files.push(path.to_string()),
        }
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected_files.iter().any(|p| p == path)
    }

    pub fn selected_files(&self) -> &[String] {
        &self.selected_files
    }

    /// Assemble the full command line.
    pub fn render(&self) -> String {
        let quote = self.quote_style.ch();
        let mut line = String::new();
        line.push_str(self.program.name);
        line.push(' ');
        line.push_str(&self.options);
        line.push_str(self.options_separator());
        line.push(quote);
        line.push_str(&self.argument);
        line.push(quote);
        line.push_str(self.argument_separator());
        line.push_str(&self.suffix());
        line
    }

    /// Separator between the options text and the quoted body.
    pub fn options_separator(&self) -> &'static str {
        if self.program.uses_end_of_options_marker {
            " -- "
        } else {
            " "
        }
    }

    /// Separator between the quoted body and the file suffix.
    pub fn argument_separator(&self) -> &'static str {
        if self.program.uses_end_of_options_marker {
            " "
        } else {
            " -- "
        }
    }

    /// Text shown in the file-summary field: mirrors the rendered suffix.
    pub fn file_summary(&self) -> String {
        if !self.selected_files.is_empty() {
            self.selected_files.join(" ")
        } else if let Some(stdin) = &self.captured_stdin {
            stdin.display().to_string()
        } else {
            FILE_SUMMARY_PLACEHOLDER.to_string()
        }
    }

    fn suffix(&self) -> String {
        if !self.selected_files.is_empty() {
            self.selected_files.join(" ")
        } else if let Some(stdin) = &self.captured_stdin {
            format!("< '{}'", stdin.display())
        } else {
            String::new()
        }
    }
}
