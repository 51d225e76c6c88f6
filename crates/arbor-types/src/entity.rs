//! Folder and file records, plus the value types the engine hands back.
//!
//! Records are owned outright by the entity store. A file refers to its
//! folder by id only; containment lives in the hierarchy index.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{FileId, FolderId, NodeId, NodeKind};

/// A folder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    id: FolderId,
    name: String,
    parent: FolderId,
}

impl Folder {
    pub fn new(id: FolderId, name: impl Into<String>, parent: FolderId) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
        }
    }

    pub fn id(&self) -> FolderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Containing folder, or [`FolderId::SUPER_ROOT`] for the base folder.
    pub fn parent(&self) -> FolderId {
        self.parent
    }
}

/// A file record holding an in-memory text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    id: FileId,
    name: String,
    content: String,
    folder: FolderId,
}

impl File {
    /// Create an empty file. `name` is the full name as typed (`notes.txt`).
    pub fn new(id: FileId, name: impl Into<String>, folder: FolderId) -> Self {
        Self {
            id,
            name: name.into(),
            content: String::new(),
            folder,
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    /// Full file name, exactly as created.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Everything before the first `.`.
    pub fn stem(&self) -> &str {
        split_file_name(&self.name).0
    }

    /// Everything after the first `.`, or `None` when the name has no dot.
    pub fn extension(&self) -> Option<&str> {
        split_file_name(&self.name).1
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Owning folder (back-reference).
    pub fn folder(&self) -> FolderId {
        self.folder
    }
}

/// Split a file name at its first `.` into stem and extension.
///
/// `a.b.c` splits into `a` and `b.c`. A name without a dot is all stem.
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    match name.split_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (name, None),
    }
}

/// One entry of a folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Entry name (not full path).
    pub name: String,
    /// Entry id, tagged with its kind.
    pub node: NodeId,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, node: NodeId) -> Self {
        Self {
            name: name.into(),
            node,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }
}

/// Marker appended to the indentation once per tree level.
pub const TREE_LEVEL_MARKER: &str = "  |";

/// One visited node of a depth-first tree walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeLine {
    /// Distance from the folder the walk started at (which is depth 0).
    pub depth: usize,
    pub node: NodeId,
    pub name: String,
}

impl TreeLine {
    pub fn new(depth: usize, node: NodeId, name: impl Into<String>) -> Self {
        Self {
            depth,
            node,
            name: name.into(),
        }
    }

    /// The indentation string for this line's depth.
    pub fn indent(&self) -> String {
        TREE_LEVEL_MARKER.repeat(self.depth)
    }
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}- {}", self.indent(), self.name)
    }
}

/// An entity that a remove operation deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removed {
    pub node: NodeId,
    pub name: String,
}

impl Removed {
    pub fn new(node: NodeId, name: impl Into<String>) -> Self {
        Self {
            node,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }
}
