//! Working-directory cursor.
//!
//! A stack of folder ids below the base folder. The base folder itself is
//! implicit: an empty stack means "at base".

use arbor_types::FolderId;

#[derive(Debug, Default, Clone)]
pub struct Cursor {
    stack: Vec<FolderId>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descend into `folder`.
    pub fn push(&mut self, folder: FolderId) {
        self.stack.push(folder);
    }

    /// Ascend one level. At base this does nothing and returns `None`.
    pub fn pop(&mut self) -> Option<FolderId> {
        self.stack.pop()
    }

    /// Current folder, or `None` at base.
    pub fn peek(&self) -> Option<FolderId> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
