//! # arbor-kernel
//!
//! The in-memory folder tree behind arbor.
//!
//! An [`Engine`] is an explicitly constructed value: whoever needs a tree
//! creates one and owns it. Inside, it is split into four parts:
//! - [`IdAllocator`]: monotonic `F<n>` / `f<n>` ids, never reused
//! - [`EntityStore`]: id-keyed tables that own every record
//! - [`HierarchyIndex`]: folder → insertion-ordered child set
//! - [`Cursor`]: the working-directory stack
//!
//! [`GrepEngine`] borrows an engine read-only to search file contents.
//!
//! Everything is synchronous and single-threaded; operations return data
//! and leave printing to the caller.

pub mod cursor;
pub mod engine;
pub mod grep;
pub mod ids;
pub mod index;
pub mod store;

pub use cursor::Cursor;
pub use engine::{DEFAULT_BASE_NAME, Engine, PARENT_DIR, validate_name};
pub use grep::{GrepEngine, GrepMatch, GrepOptions, split_lines};
pub use ids::IdAllocator;
pub use index::{Children, HierarchyIndex};
pub use store::EntityStore;
