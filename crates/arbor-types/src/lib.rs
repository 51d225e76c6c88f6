//! Shared types for arbor.
//!
//! A leaf crate with no internal arbor dependencies: typed ids, the folder
//! and file records, the value types the engine returns, and the error
//! taxonomy.
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`FolderId`]      | Folder id, displayed `F<n>`                  |
//! | [`FileId`]        | File id, displayed `f<n>`                    |
//! | [`NodeId`]        | Tagged child reference (folder or file)      |
//! | [`Folder`]        | Folder record (name + parent)                |
//! | [`File`]          | File record (name + content + folder)        |
//! | [`DirEntry`]      | One listing entry                            |
//! | [`TreeLine`]      | One node of a depth-first tree walk          |
//! | [`EngineError`]   | User-triggerable failures                    |
//! | [`Corruption`]    | Broken store/index invariants                |
//! |-------------------|----------------------------------------------|

pub mod entity;
pub mod error;
pub mod ids;

pub use entity::{DirEntry, File, Folder, Removed, TREE_LEVEL_MARKER, TreeLine, split_file_name};
pub use error::{Corruption, EngineError, EngineResult, IdParseError};
pub use ids::{FileId, FolderId, NodeId, NodeKind};
