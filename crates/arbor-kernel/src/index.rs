//! Hierarchy index: folder id → ordered set of child node ids.
//!
//! Membership is the only fact the index records. Children iterate in
//! insertion order and removal preserves the order of the rest. A folder
//! with no children has no entry at all.

use std::collections::HashMap;

use arbor_types::{FolderId, NodeId};
use indexmap::IndexSet;

/// Ordered child set of one folder.
pub type Children = IndexSet<NodeId>;

#[derive(Debug, Default, Clone)]
pub struct HierarchyIndex {
    entries: HashMap<FolderId, Children>,
}

impl HierarchyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `child` under `parent`. Returns false if it was already listed.
    pub fn insert(&mut self, parent: FolderId, child: NodeId) -> bool {
        self.entries.entry(parent).or_default().insert(child)
    }

    /// Remove `child` from `parent`, dropping the entry once it is empty.
    /// Returns false if `child` was not listed.
    pub fn remove(&mut self, parent: FolderId, child: NodeId) -> bool {
        let Some(children) = self.entries.get_mut(&parent) else {
            return false;
        };
        let removed = children.shift_remove(&child);
        if children.is_empty() {
            self.entries.remove(&parent);
        }
        removed
    }

    /// Detach and return the whole child set of `parent`.
    pub fn take(&mut self, parent: FolderId) -> Children {
        self.entries.remove(&parent).unwrap_or_default()
    }

    /// Children of `parent` in insertion order (empty if it has none).
    pub fn children(&self, parent: FolderId) -> impl Iterator<Item = NodeId> + '_ {
        self.entries
            .get(&parent)
            .into_iter()
            .flat_map(|children| children.iter().copied())
    }

    pub fn contains(&self, parent: FolderId, child: NodeId) -> bool {
        self.entries
            .get(&parent)
            .is_some_and(|children| children.contains(&child))
    }

    pub fn has_entry(&self, parent: FolderId) -> bool {
        self.entries.contains_key(&parent)
    }

    /// Every (parent, children) entry, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (FolderId, &Children)> {
        self.entries.iter().map(|(parent, children)| (*parent, children))
    }
}
