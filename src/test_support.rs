//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::program;
use crate::core::runner::{CommandRunner, RunOutput};
use crate::core::state::App;

/// A runner that reflects the command line back as stdout, so tests can
/// assert on exactly what would have been executed.
pub struct EchoRunner;

#[async_trait]
impl CommandRunner for EchoRunner {
    async fn run(&self, command_line: &str) -> RunOutput {
        RunOutput {
            stdout: command_line.to_string(),
            ..RunOutput::default()
        }
    }
}

/// Creates a grep session over `root` with an [`EchoRunner`].
pub fn test_app(root: &Path) -> App {
    App::new(program::GREP, None, Arc::new(EchoRunner), root)
}
