//! Identifier allocation.
//!
//! One strictly increasing counter per namespace. Ids are never derived from
//! how many entities are alive, so an id issued once is never issued again,
//! even after the entity it named has been deleted.

use arbor_types::{FileId, FolderId};

/// Issues fresh folder and file ids.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_folder: u64,
    next_file: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Folder numbering starts at 1 because `F0` is the super-root sentinel.
    pub fn new() -> Self {
        Self {
            next_folder: FolderId::SUPER_ROOT.raw() + 1,
            next_file: 1,
        }
    }

    pub fn next_folder_id(&mut self) -> FolderId {
        let id = FolderId::from_raw(self.next_folder);
        self.next_folder += 1;
        id
    }

    pub fn next_file_id(&mut self) -> FileId {
        let id = FileId::from_raw(self.next_file);
        self.next_file += 1;
        id
    }
}
