//! Command history log.
//!
//! A bounded, append-only record of executed commands. The oldest entry is
//! evicted once the log is full. Entry ids count up from 1 for the lifetime
//! of the log and are not reset by [`History::clear`].

use std::collections::VecDeque;
use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Entries kept before the oldest is evicted.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// What kind of operation a history entry recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum OperationKind {
    CreateFile,
    WriteFile,
    ReadFile,
    RemoveFile,
    CreateFolder,
    RemoveFolder,
    ShowTree,
    ShowPath,
    ListItems,
    ChangeDir,
    Grep,
    GrepFile,
    GrepRecursive,
    GrepOptions,
    GrepHelp,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::CreateFile => "CREATE_FILE",
            OperationKind::WriteFile => "WRITE_FILE",
            OperationKind::ReadFile => "READ_FILE",
            OperationKind::RemoveFile => "REMOVE_FILE",
            OperationKind::CreateFolder => "CREATE_FOLDER",
            OperationKind::RemoveFolder => "REMOVE_FOLDER",
            OperationKind::ShowTree => "SHOW_TREE",
            OperationKind::ShowPath => "SHOW_PATH",
            OperationKind::ListItems => "LIST_ITEMS",
            OperationKind::ChangeDir => "CHANGE_DIR",
            OperationKind::Grep => "GREP",
            OperationKind::GrepFile => "GREP_FILE",
            OperationKind::GrepRecursive => "GREP_RECURSIVE",
            OperationKind::GrepOptions => "GREP_OPTIONS",
            OperationKind::GrepHelp => "GREP_HELP",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    /// The command line as typed.
    pub command: String,
    pub kind: OperationKind,
    /// Name the command acted on (empty when there is none).
    pub target: String,
    /// Working folder path after the command ran.
    pub path: String,
    pub timestamp: SystemTime,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
    next_id: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// A log holding at most `limit` entries (at least one).
    pub fn with_capacity(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
            next_id: 1,
        }
    }

    /// Append an entry, evicting the oldest if the log is full.
    pub fn record(
        &mut self,
        command: impl Into<String>,
        kind: OperationKind,
        target: impl Into<String>,
        path: impl Into<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            id,
            command: command.into(),
            kind,
            target: target.into(),
            path: path.into(),
            timestamp: SystemTime::now(),
        });
        id
    }

    /// All retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The last `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &HistoryEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip)
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
