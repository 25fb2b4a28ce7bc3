//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Persistent Components (Event-Driven)
//!
//! Widgets that keep their own state across frames and emit events:
//! - `FieldEditor`: single-line text input with horizontal scrolling
//! - `AreaEditor`: multi-line argument editor, no soft wrap
//! - `OutputView`: evaluation result pane with ANSI translation
//! - `FileView`: full-screen highlighted file preview
//!
//! Props (focus, theme) are plain struct fields synced before each draw.
//!
//! ### Borrowed Views (Built Per Frame)
//!
//! Views over application data, constructed fresh each frame around
//! references into `App`:
//! - `FileTreeView`: the directory tree, rendered from `core::tree`
//!
//! ## Co-location of Concerns
//!
//! Each component file contains everything related to that component:
//! state types, event types, rendering logic, event handling, and tests.
//! You can read one file to understand how a component works.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── editor/          (FieldEditor, AreaEditor and caret math)
//! ├── file_tree.rs     (directory tree view)
//! ├── file_view.rs     (full-screen preview)
//! └── output_view.rs   (evaluation result pane)
//! ```

pub mod editor;
pub mod file_tree;
pub mod file_view;
pub mod output_view;

pub use editor::{AreaEditor, EditorEvent, FieldEditor};
pub use file_tree::{FileTreeState, FileTreeView};
pub use file_view::FileView;
pub use output_view::OutputView;
