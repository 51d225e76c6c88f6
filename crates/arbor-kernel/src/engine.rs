//! The storage engine: the single mutable core of the folder tree.
//!
//! An [`Engine`] owns the id allocator, the entity store, the hierarchy
//! index and the cursor. Every mutation updates the store and the index
//! inside one `&mut self` call, so callers never observe one without the
//! other.
//!
//! ## Layout
//!
//! ```text
//! F0 (super-root, no record)
//!  └── F1 base folder ("BaseFolder" by default, initial cwd)
//!       ├── F2 docs
//!       │    └── f1 a.txt
//!       └── f2 notes.md
//! ```
//!
//! Name-based operations (`set_content`, `remove_file`, `remove_folder`,
//! `change_directory`) resolve against the current folder only. Id-based
//! operations take the folder explicitly.
//!
//! User mistakes come back as [`EngineError`]. An index entry without a
//! matching record is a defect in this module, and the engine panics when
//! it meets one.

use arbor_types::{
    Corruption, DirEntry, EngineError, EngineResult, File, FileId, Folder, FolderId, NodeId,
    NodeKind, Removed, TreeLine,
};

use crate::cursor::Cursor;
use crate::ids::IdAllocator;
use crate::index::HierarchyIndex;
use crate::store::EntityStore;

/// Name given to the base folder unless the caller picks another.
pub const DEFAULT_BASE_NAME: &str = "BaseFolder";

/// Parent-directory token accepted by [`Engine::change_directory`].
pub const PARENT_DIR: &str = "..";

#[derive(Debug, Clone)]
pub struct Engine {
    ids: IdAllocator,
    store: EntityStore,
    index: HierarchyIndex,
    cursor: Cursor,
    base: FolderId,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with a base folder named [`DEFAULT_BASE_NAME`].
    pub fn new() -> Self {
        Self::with_base_name(DEFAULT_BASE_NAME)
    }

    /// Create an engine whose base folder has the given name.
    pub fn with_base_name(name: impl Into<String>) -> Self {
        let mut ids = IdAllocator::new();
        let mut store = EntityStore::new();
        let mut index = HierarchyIndex::new();

        let base = ids.next_folder_id();
        store.insert_folder(Folder::new(base, name, FolderId::SUPER_ROOT));
        index.insert(FolderId::SUPER_ROOT, base.into());

        Self {
            ids,
            store,
            index,
            cursor: Cursor::new(),
            base,
        }
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Create an empty file named `name` in `folder`.
    pub fn create_file(&mut self, folder: FolderId, name: &str) -> EngineResult<FileId> {
        validate_name(name)?;
        self.require_folder(folder)?;
        if self.find_file(folder, name).is_some() {
            return Err(EngineError::already_exists(NodeKind::File, name));
        }

        let id = self.ids.next_file_id();
        self.store.insert_file(File::new(id, name, folder));
        self.index.insert(folder, id.into());
        tracing::debug!(%id, %folder, name, "created file");
        Ok(id)
    }

    /// Create a folder named `name` under `parent`.
    ///
    /// Only folder siblings are checked: a file and a folder may share a
    /// name in the same directory.
    pub fn create_folder(&mut self, parent: FolderId, name: &str) -> EngineResult<FolderId> {
        validate_name(name)?;
        self.require_folder(parent)?;
        if self.find_folder(parent, name).is_some() {
            return Err(EngineError::already_exists(NodeKind::Folder, name));
        }

        let id = self.ids.next_folder_id();
        self.store.insert_folder(Folder::new(id, name, parent));
        self.index.insert(parent, id.into());
        tracing::debug!(%id, %parent, name, "created folder");
        Ok(id)
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Overwrite the content of the file named `file_name` in the current folder.
    pub fn set_content(
        &mut self,
        file_name: &str,
        content: impl Into<String>,
    ) -> EngineResult<FileId> {
        let cwd = self.current_folder_id();
        let id = self
            .find_file(cwd, file_name)
            .ok_or_else(|| EngineError::file_not_found(file_name))?;
        let file = self
            .store
            .file_mut(id)
            .unwrap_or_else(|| corrupted(id.into()));
        file.set_content(content);
        tracing::debug!(%id, bytes = file.content().len(), "set file content");
        Ok(id)
    }

    /// Content of the file with the given id.
    pub fn get_content(&self, id: FileId) -> EngineResult<&str> {
        self.store
            .file(id)
            .map(File::content)
            .ok_or_else(|| EngineError::file_not_found(id.to_string()))
    }

    /// Content of the file named `file_name` in the current folder.
    pub fn read_file(&self, file_name: &str) -> EngineResult<&str> {
        let id = self
            .find_file(self.current_folder_id(), file_name)
            .ok_or_else(|| EngineError::file_not_found(file_name))?;
        self.get_content(id)
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Remove the file named `file_name` from the current folder.
    pub fn remove_file(&mut self, file_name: &str) -> EngineResult<Removed> {
        let cwd = self.current_folder_id();
        let id = self
            .find_file(cwd, file_name)
            .ok_or_else(|| EngineError::file_not_found(file_name))?;

        self.index.remove(cwd, id.into());
        let record = self
            .store
            .remove_file(id)
            .unwrap_or_else(|| corrupted(id.into()));
        tracing::debug!(%id, folder = %cwd, name = record.name(), "removed file");
        Ok(Removed::new(id.into(), record.name()))
    }

    /// Remove the folder named `folder_name` from the current folder,
    /// together with everything beneath it.
    ///
    /// The subtree root is detached from its parent first, then the subtree
    /// is walked depth-first. Removed entities come back in removal order:
    /// a folder's files and subfolders before the folder itself.
    pub fn remove_folder(&mut self, folder_name: &str) -> EngineResult<Vec<Removed>> {
        let cwd = self.current_folder_id();
        let id = self
            .find_folder(cwd, folder_name)
            .ok_or_else(|| EngineError::folder_not_found(folder_name))?;

        self.index.remove(cwd, id.into());
        let removed = self.remove_subtree(id);
        tracing::debug!(%id, parent = %cwd, count = removed.len(), "removed folder subtree");
        Ok(removed)
    }

    /// Post-order removal of a detached subtree. Each stack frame holds a
    /// folder and the children it has not visited yet.
    fn remove_subtree(&mut self, root: FolderId) -> Vec<Removed> {
        let mut removed = Vec::new();
        let mut stack = vec![(root, self.index.take(root).into_iter())];
        while let Some((folder, pending)) = stack.last_mut() {
            let folder = *folder;
            match pending.next() {
                Some(NodeId::Folder(sub)) => {
                    let children = self.index.take(sub).into_iter();
                    stack.push((sub, children));
                }
                Some(child @ NodeId::File(file)) => {
                    let record = self
                        .store
                        .remove_file(file)
                        .unwrap_or_else(|| corrupted(child));
                    removed.push(Removed::new(child, record.name()));
                }
                None => {
                    stack.pop();
                    let record = self
                        .store
                        .remove_folder(folder)
                        .unwrap_or_else(|| corrupted(folder.into()));
                    removed.push(Removed::new(folder.into(), record.name()));
                }
            }
        }
        removed
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Move the cursor.
    ///
    /// `..` ascends (and does nothing at the base folder). `.` stays put.
    /// Any other name must be a child folder of the current folder.
    pub fn change_directory(&mut self, name: &str) -> EngineResult<FolderId> {
        match name {
            PARENT_DIR => {
                self.cursor.pop();
            }
            "." => {}
            _ => {
                let id = self
                    .find_folder(self.current_folder_id(), name)
                    .ok_or_else(|| EngineError::folder_not_found(name))?;
                self.cursor.push(id);
            }
        }
        Ok(self.current_folder_id())
    }

    /// The folder the cursor points at.
    pub fn current_folder_id(&self) -> FolderId {
        self.cursor.peek().unwrap_or(self.base)
    }

    pub fn base_folder_id(&self) -> FolderId {
        self.base
    }

    /// How many levels below the base folder the cursor is.
    pub fn depth(&self) -> usize {
        self.cursor.depth()
    }

    /// Path of the current folder.
    pub fn current_path(&self) -> String {
        let cwd = self.current_folder_id();
        self.folder_path(cwd).unwrap_or_else(|_| corrupted(cwd.into()))
    }

    /// `/`-joined folder names from the base folder down to `id`.
    pub fn folder_path(&self, id: FolderId) -> EngineResult<String> {
        let mut folder = self.require_folder(id)?;
        let mut names = vec![folder.name()];
        while !folder.parent().is_super_root() {
            let parent = folder.parent();
            folder = self
                .store
                .folder(parent)
                .unwrap_or_else(|| corrupted(parent.into()));
            names.push(folder.name());
            if names.len() > self.store.folder_count() {
                corrupted(id.into());
            }
        }
        names.reverse();
        Ok(names.join("/"))
    }

    /// Path of the file's folder followed by the file name.
    pub fn file_path(&self, id: FileId) -> EngineResult<String> {
        let file = self
            .store
            .file(id)
            .ok_or_else(|| EngineError::file_not_found(id.to_string()))?;
        Ok(format!("{}/{}", self.folder_path(file.folder())?, file.name()))
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// Direct children of `folder`, in creation order.
    pub fn list_children(&self, folder: FolderId) -> EngineResult<Vec<DirEntry>> {
        self.require_folder(folder)?;
        Ok(self
            .index
            .children(folder)
            .map(|child| DirEntry::new(self.node_name(child), child))
            .collect())
    }

    /// Depth-first pre-order walk starting at (and including) `folder`.
    pub fn tree(&self, folder: FolderId) -> EngineResult<Vec<TreeLine>> {
        self.require_folder(folder)?;
        let mut lines = Vec::new();
        let mut stack = vec![(NodeId::from(folder), 0)];
        while let Some((node, depth)) = stack.pop() {
            lines.push(TreeLine::new(depth, node, self.node_name(node)));
            if let NodeId::Folder(id) = node {
                // Reversed so the first child is popped first.
                let children: Vec<_> = self.index.children(id).collect();
                stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
            }
        }
        Ok(lines)
    }

    // ========================================================================
    // Search accessors
    // ========================================================================

    /// Files directly under `folder`, in creation order.
    pub fn file_ids_in(&self, folder: FolderId) -> Vec<FileId> {
        self.index
            .children(folder)
            .filter_map(NodeId::as_file)
            .collect()
    }

    /// Folders directly under `folder`, in creation order.
    pub fn folder_ids_in(&self, folder: FolderId) -> Vec<FolderId> {
        self.index
            .children(folder)
            .filter_map(NodeId::as_folder)
            .collect()
    }

    /// The file named exactly `name` directly under `folder`.
    pub fn find_file(&self, folder: FolderId, name: &str) -> Option<FileId> {
        self.index
            .children(folder)
            .filter_map(NodeId::as_file)
            .find(|id| self.file_record(*id).name() == name)
    }

    /// The folder named exactly `name` directly under `folder`.
    pub fn find_folder(&self, folder: FolderId, name: &str) -> Option<FolderId> {
        self.index
            .children(folder)
            .filter_map(NodeId::as_folder)
            .find(|id| self.folder_record(*id).name() == name)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.store.folder(id)
    }

    pub fn file(&self, id: FileId) -> Option<&File> {
        self.store.file(id)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.store.contains(node)
    }

    /// Live folders, the base folder included.
    pub fn folder_count(&self) -> usize {
        self.store.folder_count()
    }

    pub fn file_count(&self) -> usize {
        self.store.file_count()
    }

    /// Verify that the store and the index agree.
    ///
    /// Every index entry must belong to a live folder (or the super-root),
    /// every listed child must have a record naming that parent, every record
    /// must be listed, and every parent chain must end at the super-root.
    pub fn check_integrity(&self) -> Result<(), Corruption> {
        for (parent, children) in self.index.entries() {
            if !parent.is_super_root() && self.store.folder(parent).is_none() {
                return Err(Corruption::UnknownParent(parent));
            }
            for &child in children {
                let recorded = match child {
                    NodeId::Folder(id) => self.store.folder(id).map(Folder::parent),
                    NodeId::File(id) => self.store.file(id).map(File::folder),
                };
                match recorded {
                    None => return Err(Corruption::DanglingChild { parent, child }),
                    Some(recorded) if recorded != parent => {
                        return Err(Corruption::WrongParent {
                            parent,
                            child,
                            recorded,
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        for folder in self.store.folders() {
            let node = NodeId::Folder(folder.id());
            if !self.index.contains(folder.parent(), node) {
                return Err(Corruption::Unindexed(node));
            }
            let mut current = folder.parent();
            let mut steps = 0;
            while !current.is_super_root() {
                steps += 1;
                match self.store.folder(current) {
                    Some(ancestor) if steps <= self.store.folder_count() => {
                        current = ancestor.parent();
                    }
                    _ => return Err(Corruption::BrokenChain(folder.id())),
                }
            }
        }

        for file in self.store.files() {
            let node = NodeId::File(file.id());
            if !self.index.contains(file.folder(), node) {
                return Err(Corruption::Unindexed(node));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn require_folder(&self, id: FolderId) -> EngineResult<&Folder> {
        self.store
            .folder(id)
            .ok_or_else(|| EngineError::folder_not_found(id.to_string()))
    }

    fn folder_record(&self, id: FolderId) -> &Folder {
        self.store
            .folder(id)
            .unwrap_or_else(|| corrupted(id.into()))
    }

    /// The record of a file the index lists. Panics if it is missing.
    pub(crate) fn file_record(&self, id: FileId) -> &File {
        self.store.file(id).unwrap_or_else(|| corrupted(id.into()))
    }

    fn node_name(&self, node: NodeId) -> &str {
        match node {
            NodeId::Folder(id) => self.folder_record(id).name(),
            NodeId::File(id) => self.file_record(id).name(),
        }
    }
}

/// Reject names the tree cannot hold.
pub fn validate_name(name: &str) -> EngineResult<()> {
    if name.trim().is_empty() {
        return Err(EngineError::invalid_name("name must not be empty"));
    }
    if name.contains('/') {
        return Err(EngineError::invalid_name(format!("{name:?} contains '/'")));
    }
    if name == "." || name == PARENT_DIR {
        return Err(EngineError::invalid_name(format!("{name:?} is reserved")));
    }
    Ok(())
}

#[cold]
#[track_caller]
fn corrupted(node: NodeId) -> ! {
    panic!("hierarchy invariant violated: {node} is referenced but has no record")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[DirEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_new_engine_starts_at_base() {
        let engine = Engine::new();
        assert_eq!(engine.current_folder_id(), engine.base_folder_id());
        assert_eq!(engine.base_folder_id().to_string(), "F1");
        assert_eq!(engine.current_path(), DEFAULT_BASE_NAME);
        assert_eq!(engine.folder_count(), 1);
        assert_eq!(engine.file_count(), 0);
        engine.check_integrity().unwrap();
    }

    #[test]
    fn test_create_file_and_folder() {
        let mut engine = Engine::with_base_name("home");
        let base = engine.base_folder_id();

        let docs = engine.create_folder(base, "docs").unwrap();
        let file = engine.create_file(docs, "a.txt").unwrap();

        assert_eq!(engine.folder(docs).unwrap().parent(), base);
        assert_eq!(engine.file(file).unwrap().folder(), docs);
        assert_eq!(engine.folder_path(docs).unwrap(), "home/docs");
        assert_eq!(engine.file_path(file).unwrap(), "home/docs/a.txt");
        engine.check_integrity().unwrap();
    }

    #[test]
    fn test_duplicate_file_is_rejected() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        engine.create_file(base, "a.txt").unwrap();

        let err = engine.create_file(base, "a.txt").unwrap_err();
        assert_eq!(err, EngineError::already_exists(NodeKind::File, "a.txt"));
        assert_eq!(engine.file_count(), 1);
    }

    #[test]
    fn test_duplicate_folder_is_rejected() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        engine.create_folder(base, "docs").unwrap();

        let err = engine.create_folder(base, "docs").unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(engine.folder_count(), 2);
    }

    #[test]
    fn test_same_name_allowed_in_different_folders() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let a = engine.create_folder(base, "a").unwrap();
        let b = engine.create_folder(base, "b").unwrap();

        engine.create_file(a, "x.txt").unwrap();
        engine.create_file(b, "x.txt").unwrap();
        engine.create_folder(a, "inner").unwrap();
        engine.create_folder(b, "inner").unwrap();
        assert_eq!(engine.file_count(), 2);
    }

    #[test]
    fn test_file_and_folder_may_share_a_name() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let folder = engine.create_folder(base, "sub").unwrap();
        let file = engine.create_file(base, "sub").unwrap();

        let listing = engine.list_children(base).unwrap();
        assert_eq!(names(&listing), vec!["sub", "sub"]);
        assert_eq!(listing[0].node, NodeId::Folder(folder));
        assert_eq!(listing[1].node, NodeId::File(file));
    }

    #[test]
    fn test_invalid_names() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        for bad in ["", "   ", "a/b", ".", ".."] {
            assert!(matches!(
                engine.create_folder(base, bad),
                Err(EngineError::InvalidName(_))
            ));
            assert!(matches!(
                engine.create_file(base, bad),
                Err(EngineError::InvalidName(_))
            ));
        }
        assert_eq!(engine.folder_count(), 1);
    }

    #[test]
    fn test_create_in_missing_folder() {
        let mut engine = Engine::new();
        let ghost = FolderId::from_raw(99);
        assert!(engine.create_file(ghost, "a.txt").unwrap_err().is_not_found());
        assert!(engine.create_folder(ghost, "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_and_get_content() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let id = engine.create_file(base, "a.txt").unwrap();

        assert_eq!(engine.get_content(id).unwrap(), "");
        engine.set_content("a.txt", "hello").unwrap();
        engine.set_content("a.txt", "hello again").unwrap();
        assert_eq!(engine.get_content(id).unwrap(), "hello again");
        assert_eq!(engine.read_file("a.txt").unwrap(), "hello again");
    }

    #[test]
    fn test_set_content_only_sees_current_folder() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let docs = engine.create_folder(base, "docs").unwrap();
        engine.create_file(docs, "a.txt").unwrap();

        let err = engine.set_content("a.txt", "nope").unwrap_err();
        assert_eq!(err, EngineError::file_not_found("a.txt"));

        engine.change_directory("docs").unwrap();
        engine.set_content("a.txt", "yes").unwrap();
        assert_eq!(engine.read_file("a.txt").unwrap(), "yes");
    }

    #[test]
    fn test_remove_file_prunes_empty_entry() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let docs = engine.create_folder(base, "docs").unwrap();
        engine.change_directory("docs").unwrap();
        let id = engine.create_file(docs, "a.txt").unwrap();

        let removed = engine.remove_file("a.txt").unwrap();
        assert_eq!(removed, Removed::new(id.into(), "a.txt"));
        assert!(!engine.contains(id.into()));
        assert!(!engine.index.has_entry(docs));
        assert!(engine.remove_file("a.txt").unwrap_err().is_not_found());
        engine.check_integrity().unwrap();
    }

    #[test]
    fn test_remove_folder_is_recursive() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let top = engine.create_folder(base, "top").unwrap();
        let mid = engine.create_folder(top, "mid").unwrap();
        let leaf = engine.create_folder(mid, "leaf").unwrap();
        let f1 = engine.create_file(top, "one.txt").unwrap();
        let f2 = engine.create_file(leaf, "two.txt").unwrap();
        let keep = engine.create_file(base, "keep.txt").unwrap();

        let removed = engine.remove_folder("top").unwrap();
        let removed_nodes: Vec<NodeId> = removed.iter().map(|r| r.node).collect();
        assert_eq!(
            removed_nodes,
            vec![f2.into(), leaf.into(), mid.into(), f1.into(), top.into()]
        );

        for node in removed_nodes {
            assert!(!engine.contains(node));
        }
        for folder in [top, mid, leaf] {
            assert!(!engine.index.has_entry(folder));
        }
        assert!(engine.contains(keep.into()));
        assert_eq!(engine.folder_count(), 1);
        assert_eq!(engine.file_count(), 1);
        engine.check_integrity().unwrap();
    }

    #[test]
    fn test_remove_folder_ignores_same_named_file() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let file = engine.create_file(base, "sub").unwrap();
        assert!(engine.remove_folder("sub").unwrap_err().is_not_found());

        engine.create_folder(base, "sub").unwrap();
        engine.remove_folder("sub").unwrap();
        assert!(engine.contains(file.into()));
    }

    #[test]
    fn test_change_directory_state_machine() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let a = engine.create_folder(base, "a").unwrap();
        let b = engine.create_folder(a, "b").unwrap();

        assert_eq!(engine.change_directory("..").unwrap(), base);
        assert_eq!(engine.depth(), 0);

        assert_eq!(engine.change_directory("a").unwrap(), a);
        assert_eq!(engine.change_directory("b").unwrap(), b);
        assert_eq!(engine.depth(), 2);
        assert_eq!(engine.current_path(), "BaseFolder/a/b");

        let err = engine.change_directory("missing").unwrap_err();
        assert_eq!(err, EngineError::folder_not_found("missing"));
        assert_eq!(engine.current_folder_id(), b);

        assert_eq!(engine.change_directory(".").unwrap(), b);
        engine.change_directory("..").unwrap();
        engine.change_directory("..").unwrap();
        engine.change_directory("..").unwrap();
        assert_eq!(engine.current_folder_id(), base);
    }

    #[test]
    fn test_cd_into_file_name_fails() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        engine.create_file(base, "notes").unwrap();
        assert!(engine.change_directory("notes").unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_children_in_creation_order() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        engine.create_file(base, "zeta.txt").unwrap();
        engine.create_folder(base, "alpha").unwrap();
        engine.create_file(base, "beta.txt").unwrap();

        let listing = engine.list_children(base).unwrap();
        assert_eq!(names(&listing), vec!["zeta.txt", "alpha", "beta.txt"]);
        assert_eq!(listing[1].kind(), NodeKind::Folder);

        let empty = engine.create_folder(base, "empty").unwrap();
        assert!(engine.list_children(empty).unwrap().is_empty());
        assert!(engine.list_children(FolderId::from_raw(77)).is_err());
    }

    #[test]
    fn test_tree_is_preorder_with_depths() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let docs = engine.create_folder(base, "docs").unwrap();
        engine.create_file(docs, "a.txt").unwrap();
        let deep = engine.create_folder(docs, "deep").unwrap();
        engine.create_file(deep, "b.txt").unwrap();
        engine.create_file(base, "c.txt").unwrap();

        let rendered: Vec<String> = engine
            .tree(base)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "- BaseFolder",
                "  |- docs",
                "  |  |- a.txt",
                "  |  |- deep",
                "  |  |  |- b.txt",
                "  |- c.txt",
            ]
        );

        let subtree = engine.tree(docs).unwrap();
        assert_eq!(subtree[0].depth, 0);
        assert_eq!(subtree[0].name, "docs");
        assert_eq!(subtree.len(), 4);
    }

    #[test]
    fn test_search_accessors() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let f1 = engine.create_file(base, "a.txt").unwrap();
        let d1 = engine.create_folder(base, "d").unwrap();
        let f2 = engine.create_file(base, "b.txt").unwrap();

        assert_eq!(engine.file_ids_in(base), vec![f1, f2]);
        assert_eq!(engine.folder_ids_in(base), vec![d1]);
        assert_eq!(engine.find_file(base, "b.txt"), Some(f2));
        assert_eq!(engine.find_file(base, "d"), None);
        assert_eq!(engine.find_folder(base, "d"), Some(d1));
        assert!(engine.file_ids_in(d1).is_empty());
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let first = engine.create_file(base, "a.txt").unwrap();
        engine.remove_file("a.txt").unwrap();
        let second = engine.create_file(base, "a.txt").unwrap();
        assert_ne!(first, second);

        let d1 = engine.create_folder(base, "d").unwrap();
        engine.remove_folder("d").unwrap();
        let d2 = engine.create_folder(base, "d").unwrap();
        assert_ne!(d1, d2);
    }

    #[test]
    fn test_integrity_detects_dangling_child() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let id = engine.create_file(base, "a.txt").unwrap();
        engine.store.remove_file(id);

        assert_eq!(
            engine.check_integrity(),
            Err(Corruption::DanglingChild {
                parent: base,
                child: id.into()
            })
        );
    }

    #[test]
    fn test_integrity_detects_unindexed_record() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let id = engine.create_file(base, "a.txt").unwrap();
        engine.index.remove(base, id.into());

        assert_eq!(
            engine.check_integrity(),
            Err(Corruption::Unindexed(id.into()))
        );
    }

    #[test]
    #[should_panic(expected = "hierarchy invariant violated")]
    fn test_listing_a_corrupted_folder_panics() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let id = engine.create_file(base, "a.txt").unwrap();
        engine.store.remove_file(id);
        let _ = engine.list_children(base);
    }

    #[test]
    #[should_panic(expected = "hierarchy invariant violated")]
    fn test_grep_over_a_corrupted_folder_panics() {
        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let id = engine.create_file(base, "a.txt").unwrap();
        engine.store.remove_file(id);
        let _ = crate::GrepEngine::new(&engine).search("x", &crate::GrepOptions::default());
    }

    /// A chain far deeper than the call stack could follow recursively.
    #[test]
    fn test_deep_chain_walks_without_recursion() {
        const DEPTH: usize = 20_000;

        let mut engine = Engine::new();
        let base = engine.base_folder_id();
        let mut parent = base;
        for n in 0..DEPTH {
            parent = engine.create_folder(parent, &format!("d{n}")).unwrap();
        }
        let bottom = engine.create_file(parent, "bottom.txt").unwrap();
        engine.store.file_mut(bottom).unwrap().set_content("found");

        let lines = engine.tree(base).unwrap();
        assert_eq!(lines.len(), DEPTH + 2);
        assert_eq!(lines[1].name, "d0");
        assert_eq!(lines[DEPTH + 1].depth, DEPTH + 1);
        assert_eq!(lines[DEPTH + 1].name, "bottom.txt");

        let options = crate::GrepOptions {
            recursive: true,
            ..Default::default()
        };
        let matches = crate::GrepEngine::new(&engine)
            .search("found", &options)
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].file_path.ends_with("/bottom.txt"));

        let removed = engine.remove_folder("d0").unwrap();
        assert_eq!(removed.len(), DEPTH + 1);
        assert_eq!(removed[0].node, NodeId::File(bottom));
        assert_eq!(removed[1].name, format!("d{}", DEPTH - 1));
        assert_eq!(removed[DEPTH].name, "d0");
        assert_eq!(engine.folder_count(), 1);
        assert_eq!(engine.file_count(), 0);
        assert!(engine.list_children(base).unwrap().is_empty());
    }
}
