//! # Application State
//!
//! Core business state for Fiddle. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── expression: Expression          // the command being composed
//! ├── tree: FileTree                  // lazy view of the working directory
//! ├── focus: Focus                    // pane receiving keystrokes
//! ├── return_focus: Focus             // pane Esc returns to from the output
//! ├── output: String                  // latest evaluation result
//! ├── next_run_seq: u64               // sequence for the next scheduled run
//! ├── applied_run_seq: u64            // newest run already displayed
//! └── runner: Arc<dyn CommandRunner>  // shell execution seam
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::expression::Expression;
use crate::core::focus::Focus;
use crate::core::program::ProgramSpec;
use crate::core::runner::CommandRunner;
use crate::core::tree::FileTree;
use std::path::PathBuf;
use std::sync::Arc;

pub struct App {
    pub expression: Expression,
    pub tree: FileTree,
    pub focus: Focus,
    /// Where Esc lands when leaving the output pane. Updated whenever an
    /// editing surface hands focus to the output, so inspection round-trips.
    pub return_focus: Focus,
    pub output: String,
    next_run_seq: u64,
    /// Sequence number of the newest run whose output has been applied.
    /// Results arriving out of order with an older sequence are dropped.
    pub applied_run_seq: u64,
    pub runner: Arc<dyn CommandRunner>,
}

impl App {
    pub fn new(
        program: ProgramSpec,
        captured_stdin: Option<PathBuf>,
        runner: Arc<dyn CommandRunner>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            expression: Expression::new(program, captured_stdin),
            tree: FileTree::new(root),
            focus: Focus::Options,
            return_focus: Focus::Options,
            output: String::new(),
            next_run_seq: 0,
            applied_run_seq: 0,
            runner,
        }
    }

    /// Claim the sequence number for a newly scheduled run.
    pub fn next_seq(&mut self) -> u64 {
        self.next_run_seq += 1;
        self.next_run_seq
    }
}
