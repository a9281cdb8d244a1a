//! Core data models used throughout yearshelf.
//!
//! These types represent the directory trees served to browsing clients
//! and the captured outcome of an archive ingestion run.

use serde::Serialize;

/// One node of an expanded directory tree.
///
/// Serializes to the wire shape consumed by the browsing client:
/// `{"type": "folder", "name": ..., "children": [...]}` for folders and
/// `{"type": "file", "name": ...}` for files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DirectoryEntry {
    /// A directory and its fully expanded contents, in the order the
    /// underlying directory read produced them.
    Folder {
        name: String,
        children: Vec<DirectoryEntry>,
    },
    /// A leaf entry. Anything that is not a directory.
    File { name: String },
}

impl DirectoryEntry {
    pub fn name(&self) -> &str {
        match self {
            DirectoryEntry::Folder { name, .. } => name,
            DirectoryEntry::File { name } => name,
        }
    }
}

/// Captured outcome of one ingestion invocation, immutable once the
/// subprocess has terminated.
#[derive(Debug, Clone)]
pub struct IngestionResult {
    /// Exit code of the child process. A signal-killed child (no exit
    /// code on Unix) is recorded as -1.
    pub exit_code: i32,
    /// Everything the child wrote to stdout.
    pub stdout: String,
    /// Everything the child wrote to stderr.
    pub stderr: String,
}

impl IngestionResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// The retrievable link printed by a successful run. Trimmed,
    /// otherwise trusted verbatim.
    pub fn link(&self) -> &str {
        self.stdout.trim()
    }

    /// Diagnostic text for a failed run: captured stderr, or a generic
    /// message when the child died silently.
    pub fn failure_message(&self) -> String {
        if self.stderr.is_empty() {
            "Download script failed.".to_string()
        } else {
            self.stderr.clone()
        }
    }
}
