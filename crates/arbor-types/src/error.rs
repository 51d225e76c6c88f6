//! Error types.
//!
//! [`EngineError`] covers everything a user can trigger: a missing name, a
//! sibling collision, an unusable name. These are returned, never raised.
//! [`Corruption`] describes a broken store/index invariant; the engine
//! reports it from its integrity check and panics if it meets one mid-operation.

use thiserror::Error;

use crate::ids::{FolderId, NodeId, NodeKind};

/// User-facing engine error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No file or folder with this name (or id) in scope.
    #[error("{kind} not found: {name}")]
    NotFound { kind: NodeKind, name: String },

    /// A sibling of the same kind already has this name.
    #[error("{kind} name already exists: {name}")]
    AlreadyExists { kind: NodeKind, name: String },

    /// Empty or otherwise unusable name.
    #[error("invalid name: {0}")]
    InvalidName(String),
}

impl EngineError {
    /// Create a NotFound error.
    pub fn not_found(kind: NodeKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create a NotFound error for a folder.
    pub fn folder_not_found(name: impl Into<String>) -> Self {
        Self::not_found(NodeKind::Folder, name)
    }

    /// Create a NotFound error for a file.
    pub fn file_not_found(name: impl Into<String>) -> Self {
        Self::not_found(NodeKind::File, name)
    }

    /// Create an AlreadyExists error.
    pub fn already_exists(kind: NodeKind, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            name: name.into(),
        }
    }

    /// Create an InvalidName error.
    pub fn invalid_name(reason: impl Into<String>) -> Self {
        Self::InvalidName(reason.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Engine result type.
pub type EngineResult<T> = Result<T, EngineError>;

/// A violated store/index invariant. Always a defect, never user error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Corruption {
    /// The index has an entry for a folder with no record.
    #[error("index entry for unknown folder {0}")]
    UnknownParent(FolderId),

    /// The index lists a child with no record.
    #[error("{parent} lists {child} but it has no record")]
    DanglingChild { parent: FolderId, child: NodeId },

    /// The index lists a child whose record names a different parent.
    #[error("{parent} lists {child} but its record points at {recorded}")]
    WrongParent {
        parent: FolderId,
        child: NodeId,
        recorded: FolderId,
    },

    /// A record exists that no index entry lists.
    #[error("{0} has a record but is not listed under its parent")]
    Unindexed(NodeId),

    /// A folder's parent chain never reaches the super-root.
    #[error("parent chain of {0} does not reach the root")]
    BrokenChain(FolderId),
}

/// Failure to parse an id from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("id has the wrong namespace prefix: {0:?}")]
    WrongPrefix(String),

    #[error("id has no valid sequence number: {0:?}")]
    BadNumber(String),
}
