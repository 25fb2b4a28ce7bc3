//! # File tree
//!
//! Lazy tree over the working directory. Nodes live in an arena addressed
//! by [`NodeId`]; a directory's entries are listed exactly once, on first
//! expansion, and the classification of every listed entry is kept for the
//! session. Files are kept only when their head reads as text and their
//! extension is not a known image format.
//!
//! A listing failure (permissions, transient I/O) marks the node instead of
//! propagating: the node renders with an error indicator and the session
//! continues.
//!
//! The tree also owns the cursor over its flattened visible rows, so the
//! reducer can act on "the node under the cursor" without asking the view.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Index into the tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// Lazy-listing status of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    NotLoaded,
    Loaded,
    /// The one listing attempt failed; shown with an error marker.
    Failed,
}

#[derive(Debug)]
pub struct TreeNode {
    /// Filesystem path rooted at the session root; every listing and
    /// preview read goes through it, so it must stay valid regardless of
    /// the process working directory.
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    /// First line of a file, cached at listing time for language detection.
    pub sample_line: String,
    pub children: Vec<NodeId>,
    pub listing: Listing,
    pub expanded: bool,
}

/// Extensions excluded from the tree regardless of content.
const IMAGE_EXTENSIONS: [&str; 4] = ["gif", "png", "jpg", "jpeg"];

/// How many bytes of a file the text classifier inspects.
const SAMPLE_CAP: usize = 1024;

pub struct FileTree {
    nodes: Vec<TreeNode>,
    /// Cursor position within the flattened visible rows.
    cursor: usize,
}

impl FileTree {
    /// Build a tree rooted at `root` and list the root's entries. A root
    /// listing failure is recorded on the node, not propagated; the tree
    /// just starts empty with an error marker.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root.display().to_string();
        let mut tree = Self {
            nodes: vec![TreeNode {
                path: root,
                name,
                is_dir: true,
                sample_line: String::new(),
                children: Vec::new(),
                listing: Listing::NotLoaded,
                expanded: true,
            }],
            cursor: 0,
        };
        let root_id = tree.root_id();
        if let Err(e) = tree.load_children(root_id) {
            log::warn!("Failed to list {}: {}", tree.node(root_id).path.display(), e);
        }
        tree
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id.0 == 0
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Path as the expression shows it: relative to the session root, so
    /// root children read `src/main.rs`, never `./src/main.rs`.
    pub fn display_path(&self, id: NodeId) -> String {
        let node = &self.nodes[id.0];
        match node.path.strip_prefix(&self.nodes[0].path) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
            _ => node.path.to_string_lossy().into_owned(),
        }
    }

    /// List a directory node's entries and attach them as children, leaving
    /// the node expanded. Called at most once per node; a failure marks the
    /// node `Failed` and the error is returned for logging.
    pub fn load_children(&mut self, id: NodeId) -> io::Result<()> {
        let parent_path = self.nodes[id.0].path.clone();
        let entries = match list_directory(&parent_path) {
            Ok(entries) => entries,
            Err(e) => {
                self.nodes[id.0].listing = Listing::Failed;
                return Err(e);
            }
        };

        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            let child_id = NodeId(self.nodes.len());
            self.nodes.push(TreeNode {
                path: parent_path.join(&entry.name),
                name: entry.name,
                is_dir: entry.is_dir,
                sample_line: entry.sample_line,
                children: Vec::new(),
                listing: if entry.is_dir {
                    Listing::NotLoaded
                } else {
                    Listing::Loaded
                },
                expanded: false,
            });
            children.push(child_id);
        }
        self.nodes[id.0].children = children;
        self.nodes[id.0].listing = Listing::Loaded;
        self.nodes[id.0].expanded = true;
        Ok(())
    }

    pub fn toggle_expanded(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        node.expanded = !node.expanded;
        self.clamp_cursor();
    }

    /// Flattened `(node, depth)` rows: the root plus every child reachable
    /// through expanded directories, in listing order.
    pub fn visible_rows(&self) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        self.walk(self.root_id(), 0, &mut rows);
        rows
    }

    fn walk(&self, id: NodeId, depth: usize, rows: &mut Vec<(NodeId, usize)>) {
        rows.push((id, depth));
        if self.nodes[id.0].expanded {
            for &child in &self.nodes[id.0].children {
                self.walk(child, depth + 1, rows);
            }
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Node currently under the cursor.
    pub fn cursor_node(&self) -> Option<NodeId> {
        self.visible_rows().get(self.cursor).map(|&(id, _)| id)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.visible_rows().len() {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        let rows = self.visible_rows().len();
        if self.cursor >= rows {
            self.cursor = rows.saturating_sub(1);
        }
    }
}

struct RawEntry {
    name: String,
    is_dir: bool,
    sample_line: String,
}

/// List `dir` sorted by name, keeping directories and text files.
fn list_directory(dir: &Path) -> io::Result<Vec<RawEntry>> {
    let mut entries: Vec<RawEntry> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            entries.push(RawEntry {
                name,
                is_dir: true,
                sample_line: String::new(),
            });
            continue;
        }
        if has_denied_extension(&name) {
            continue;
        }
        // Binary or unreadable files are skipped silently; the filter is
        // the feature, not an error.
        if let Some(sample_line) = read_sample_line(&entry.path()) {
            entries.push(RawEntry {
                name,
                is_dir: false,
                sample_line,
            });
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn has_denied_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|denied| ext.eq_ignore_ascii_case(denied))
        })
}

/// First line of the file's head, or `None` when the head is not valid
/// text. Reads at most [`SAMPLE_CAP`] bytes.
fn read_sample_line(path: &Path) -> Option<String> {
    let mut head = Vec::with_capacity(SAMPLE_CAP);
    fs::File::open(path)
        .ok()?
        .take(SAMPLE_CAP as u64)
        .read_to_end(&mut head)
        .ok()?;
    let text = match std::str::from_utf8(&head) {
        Ok(text) => text,
        // A multi-byte character split by the read cap is not binary data.
        Err(e) if head.len() == SAMPLE_CAP && e.error_len().is_none() => {
            std::str::from_utf8(&head[..e.valid_up_to()]).ok()?
        }
        Err(_) => return None,
    };
    Some(text.lines().next().unwrap_or_default().to_string())
}
