//! Typed identifiers for folders and files.
//!
//! Folder ids display as `F<n>` and file ids as `f<n>`. The two namespaces
//! never collide, but nothing inspects the prefix to decide what an id is:
//! traversal code carries a [`NodeId`], which tags the kind explicitly.
//!
//! `F0` is reserved for the super-root sentinel. It has no folder record and
//! exists only as the parent of the base folder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdParseError;

/// A folder identifier (`F<n>`).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(u64);

/// A file identifier (`f<n>`).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(u64);

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_typed_id {
    ($T:ident, $prefix:literal, $name:literal) => {
        impl $T {
            /// Display prefix for this namespace.
            pub const PREFIX: char = $prefix;

            /// Wrap a raw sequence number.
            pub const fn from_raw(n: u64) -> Self {
                Self(n)
            }

            /// The raw sequence number.
            pub const fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}{})", $name, $prefix, self.0)
            }
        }

        impl FromStr for $T {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s
                    .strip_prefix($prefix)
                    .ok_or_else(|| IdParseError::WrongPrefix(s.to_string()))?;
                digits
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| IdParseError::BadNumber(s.to_string()))
            }
        }
    };
}

impl_typed_id!(FolderId, 'F', "FolderId");
impl_typed_id!(FileId, 'f', "FileId");

impl FolderId {
    /// The synthetic parent of the base folder. Never has a folder record.
    pub const SUPER_ROOT: FolderId = FolderId(0);

    /// Check if this is the super-root sentinel.
    pub fn is_super_root(&self) -> bool {
        *self == Self::SUPER_ROOT
    }
}

// ── Node kind ───────────────────────────────────────────────────────────────

/// Which kind of entity a node is.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::File => "file",
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, NodeKind::Folder)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tagged node id ──────────────────────────────────────────────────────────

/// A child reference in the hierarchy: either a folder or a file.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum NodeId {
    Folder(FolderId),
    File(FileId),
}

impl NodeId {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeId::Folder(_) => NodeKind::Folder,
            NodeId::File(_) => NodeKind::File,
        }
    }

    /// The folder id, if this node is a folder.
    pub fn as_folder(self) -> Option<FolderId> {
        match self {
            NodeId::Folder(id) => Some(id),
            NodeId::File(_) => None,
        }
    }

    /// The file id, if this node is a file.
    pub fn as_file(self) -> Option<FileId> {
        match self {
            NodeId::File(id) => Some(id),
            NodeId::Folder(_) => None,
        }
    }
}

impl From<FolderId> for NodeId {
    fn from(id: FolderId) -> Self {
        NodeId::Folder(id)
    }
}

impl From<FileId> for NodeId {
    fn from(id: FileId) -> Self {
        NodeId::File(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Folder(id) => fmt::Display::fmt(id, f),
            NodeId::File(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl FromStr for NodeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            Some(FolderId::PREFIX) => s.parse().map(NodeId::Folder),
            Some(FileId::PREFIX) => s.parse().map(NodeId::File),
            _ => Err(IdParseError::WrongPrefix(s.to_string())),
        }
    }
}
