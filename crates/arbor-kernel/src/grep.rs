//! GrepEngine: line search across the files of the folder tree.
//!
//! The pattern is tried as a regular expression first. Anything that fails
//! to compile (`foo(`, `[abc`) is matched as a plain substring instead, so
//! a search never fails because of its pattern.

use arbor_types::{EngineError, EngineResult, FileId, FolderId};
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::engine::Engine;

/// Search parameters.
///
/// `show_line_numbers`, `show_file_path` and `count_only` only affect how a
/// caller presents the results; the engine returns every match regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrepOptions {
    pub case_insensitive: bool,
    pub recursive: bool,
    pub show_line_numbers: bool,
    pub show_file_path: bool,
    pub count_only: bool,
    pub invert_match: bool,
    /// Search only this file (by name, in the target folder).
    pub target_file: Option<String>,
    /// Folder to search. Defaults to the current folder.
    pub target_folder: Option<FolderId>,
}

impl Default for GrepOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            recursive: false,
            show_line_numbers: true,
            show_file_path: true,
            count_only: false,
            invert_match: false,
            target_file: None,
            target_folder: None,
        }
    }
}

/// One matching line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrepMatch {
    pub file_name: String,
    pub file_path: String,
    /// 1-based.
    pub line_number: usize,
    pub line: String,
    pub file_id: FileId,
}

/// Read-only search over an [`Engine`].
pub struct GrepEngine<'a> {
    engine: &'a Engine,
}

impl<'a> GrepEngine<'a> {
    pub fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Search for `pattern` and return matches in search order: files in
    /// index order, then (if recursive) each subfolder depth-first.
    pub fn search(&self, pattern: &str, options: &GrepOptions) -> EngineResult<Vec<GrepMatch>> {
        let folder = options
            .target_folder
            .unwrap_or_else(|| self.engine.current_folder_id());
        if self.engine.folder(folder).is_none() {
            return Err(EngineError::folder_not_found(folder.to_string()));
        }

        let files = match &options.target_file {
            Some(name) => vec![
                self.engine
                    .find_file(folder, name)
                    .ok_or_else(|| EngineError::file_not_found(name.as_str()))?,
            ],
            None => self.collect_files(folder, options.recursive),
        };

        let matcher = Matcher::new(pattern, options.case_insensitive);
        let mut matches = Vec::new();
        for id in files {
            let file = self.engine.file_record(id);
            let path = self.engine.file_path(id)?;
            for (idx, line) in split_lines(file.content()).enumerate() {
                if matcher.is_match(line) != options.invert_match {
                    matches.push(GrepMatch {
                        file_name: file.name().to_string(),
                        file_path: path.clone(),
                        line_number: idx + 1,
                        line: line.to_string(),
                        file_id: id,
                    });
                }
            }
        }

        tracing::debug!(
            pattern,
            %folder,
            recursive = options.recursive,
            matches = matches.len(),
            "grep finished"
        );
        Ok(matches)
    }

    /// Files of `folder`, then (if recursive) those of each subfolder,
    /// depth-first.
    fn collect_files(&self, folder: FolderId, recursive: bool) -> Vec<FileId> {
        let mut files = Vec::new();
        let mut stack = vec![folder];
        while let Some(folder) = stack.pop() {
            files.extend(self.engine.file_ids_in(folder));
            if recursive {
                stack.extend(self.engine.folder_ids_in(folder).into_iter().rev());
            }
        }
        files
    }
}

/// Split content on `\n` or `\r\n`. Empty content has no lines.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content.lines()
}

enum Matcher {
    Regex(Regex),
    Literal { needle: String, fold_case: bool },
}

impl Matcher {
    fn new(pattern: &str, case_insensitive: bool) -> Self {
        match RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
        {
            Ok(re) => Self::Regex(re),
            Err(err) => {
                tracing::debug!(pattern, %err, "not a valid regex, matching literally");
                let needle = if case_insensitive {
                    pattern.to_lowercase()
                } else {
                    pattern.to_string()
                };
                Self::Literal {
                    needle,
                    fold_case: case_insensitive,
                }
            }
        }
    }

    fn is_match(&self, line: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(line),
            Self::Literal { needle, fold_case } if *fold_case => {
                line.to_lowercase().contains(needle.as_str())
            }
            Self::Literal { needle, .. } => line.contains(needle.as_str()),
        }
    }
}
