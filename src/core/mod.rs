//! # Core Composer Logic
//!
//! Everything the composer knows that is not tied to a terminal: the
//! expression being built, the focus state machine, the file tree, and the
//! reducer that applies input to all of it.
//!
//! ```text
//!   keystroke ──▶ focus::route ──▶ Action ──▶ action::update ──▶ Effect
//!                                                  │
//!                                         mutates App state
//!                                 (expression, tree, focus, output)
//! ```
//!
//! The `tui` module feeds actions in and performs the effects (spawning
//! runs, listing directories, seeding editors). Background run results come
//! back as actions too, so this module never sees a thread.
//!
//! ## Modules
//!
//! - [`expression`]: the five editable fields and `render()`
//! - [`focus`]: which surface owns the keyboard, and the transition table
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`tree`]: the lazy file tree
//! - [`runner`]: the shell-execution boundary
//! - [`program`]: the wrapped-program registry
//! - [`config`]: layered settings
//! - [`state`]: the `App` aggregate

pub mod action;
pub mod config;
pub mod expression;
pub mod focus;
pub mod program;
pub mod runner;
pub mod state;
pub mod tree;
