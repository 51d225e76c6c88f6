//! Text rendering for command results.
//!
//! Each function turns engine data into the lines a command prints. None of
//! them add a trailing newline.

use std::fmt::Write;

use arbor_kernel::{GrepMatch, GrepOptions};
use arbor_types::{DirEntry, FileId, FolderId, NodeKind, Removed, TreeLine};
use chrono::{DateTime, Local};

use crate::history::HistoryEntry;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const COMMAND_HELP: &str = "\
Available commands:
  mkdir <folder>              create a folder here
  rmdir <folder>              remove a folder and everything in it
  cd <folder> | cd ..         change directory
  ls                          list this folder
  touch <file>                create an empty file
  write <file> <content>      replace a file's content (\\n for newline)
  cat <file>                  print a file's content
  rm <file>                   remove a file
  tree                        show the tree below this folder
  pwd                         print the current path
  grep [-icrvn] <pattern> [file]
                              search file contents (grep --help)
  history [n] | history clear show or clear command history
  help                        show this list
  exit | quit                 leave";

pub const GREP_HELP: &str = "\
GREP - Search for patterns in files
Usage:
  grep <pattern>                    - Search pattern in current directory
  grep <pattern> <filename>         - Search pattern in specific file
  grep -i <pattern>                 - Case-insensitive search
  grep -r <pattern>                 - Recursive search in subdirectories
  grep -c <pattern>                 - Count matches only
  grep -v <pattern>                 - Invert match (show non-matching lines)
  grep -n <pattern>                 - Show line numbers (default)
  grep --help                       - Show this help

Options can be combined: grep -ir <pattern>
Patterns are regular expressions; an invalid one is matched literally";

pub fn file_created(id: FileId, name: &str, folder: FolderId) -> String {
    format!("File created! name = {name}, id = {id}, in folder {folder}")
}

pub fn folder_created(id: FolderId, name: &str) -> String {
    format!("New folder created! name = {name}, id = {id}")
}

pub fn content_written(name: &str, bytes: usize) -> String {
    format!("Wrote {bytes} bytes to {name}")
}

/// One line per removed entity, then a summary line.
pub fn removed(items: &[Removed]) -> String {
    let mut out = String::new();
    for item in items {
        let label = match item.kind() {
            NodeKind::Folder => "Folder",
            NodeKind::File => "File",
        };
        let _ = writeln!(out, "{label} {} ({}) removed", item.node, item.name);
    }
    let summary = match items.last().map(Removed::kind) {
        Some(NodeKind::Folder) => "Folder removed successfully!",
        _ => "File removed successfully!",
    };
    out.push_str(summary);
    out
}

/// Entry names, one per line, in listing order.
pub fn listing(entries: &[DirEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn tree(lines: &[TreeLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Grep results, grouped under a `=== path ===` header per file.
pub fn grep_results(matches: &[GrepMatch], options: &GrepOptions) -> String {
    if matches.is_empty() {
        return "No matches found.".to_string();
    }
    if options.count_only {
        return format!("Total matches: {}", matches.len());
    }

    let mut out = String::new();
    let mut current: Option<FileId> = None;
    for m in matches {
        if options.show_file_path && current != Some(m.file_id) {
            if current.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "=== {} ===", m.file_path);
            current = Some(m.file_id);
        }
        if options.show_line_numbers {
            let _ = write!(out, "{}: ", m.line_number);
        }
        out.push_str(&m.line);
        out.push('\n');
    }
    out.pop();
    out
}

pub fn format_timestamp(entry: &HistoryEntry) -> String {
    let local: DateTime<Local> = entry.timestamp.into();
    local.format(TIMESTAMP_FORMAT).to_string()
}

/// History as a table. `title` goes above the column headers.
pub fn history_table<'a>(
    title: &str,
    entries: impl IntoIterator<Item = &'a HistoryEntry>,
) -> String {
    let mut entries = entries.into_iter().peekable();
    if entries.peek().is_none() {
        return "No history available.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
    let _ = writeln!(
        out,
        "{:>4}  {:<19}  {:<14}  {:<20}  {:<15}  Command",
        "ID", "Timestamp", "Operation", "Target", "Path"
    );
    let _ = writeln!(out, "{}", "-".repeat(100));
    for entry in entries {
        let _ = writeln!(
            out,
            "{:>4}  {:<19}  {:<14}  {:<20}  {:<15}  {}",
            entry.id,
            format_timestamp(entry),
            entry.kind.as_str(),
            entry.target,
            entry.path,
            entry.command
        );
    }
    out.pop();
    out
}
