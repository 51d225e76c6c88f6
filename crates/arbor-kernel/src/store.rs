//! Entity store: the id-keyed tables that own every folder and file record.
//!
//! Deleting an entity removes its table entry. Nothing else holds the
//! record, so there is nothing left to dangle.

use std::collections::HashMap;

use arbor_types::{File, FileId, Folder, FolderId, NodeId};

#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    folders: HashMap<FolderId, Folder>,
    files: HashMap<FileId, File>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a folder record, returning any record it replaced.
    pub fn insert_folder(&mut self, folder: Folder) -> Option<Folder> {
        self.folders.insert(folder.id(), folder)
    }

    /// Insert a file record, returning any record it replaced.
    pub fn insert_file(&mut self, file: File) -> Option<File> {
        self.files.insert(file.id(), file)
    }

    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(&id)
    }

    pub fn file(&self, id: FileId) -> Option<&File> {
        self.files.get(&id)
    }

    pub fn file_mut(&mut self, id: FileId) -> Option<&mut File> {
        self.files.get_mut(&id)
    }

    pub fn remove_folder(&mut self, id: FolderId) -> Option<Folder> {
        self.folders.remove(&id)
    }

    pub fn remove_file(&mut self, id: FileId) -> Option<File> {
        self.files.remove(&id)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        match node {
            NodeId::Folder(id) => self.folders.contains_key(&id),
            NodeId::File(id) => self.files.contains_key(&id),
        }
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_lookup_remove() {
        let mut store = EntityStore::new();
        let folder = FolderId::from_raw(1);
        let file = FileId::from_raw(1);

        store.insert_folder(Folder::new(folder, "base", FolderId::SUPER_ROOT));
        store.insert_file(File::new(file, "a.txt", folder));

        assert!(store.contains(folder.into()));
        assert!(store.contains(file.into()));
        assert_eq!(store.file(file).map(File::name), Some("a.txt"));

        let removed = store.remove_file(file).unwrap();
        assert_eq!(removed.folder(), folder);
        assert!(!store.contains(file.into()));
        assert_eq!(store.file_count(), 0);
        assert_eq!(store.folder_count(), 1);
    }
}
