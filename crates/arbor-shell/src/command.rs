//! Command-line parsing.
//!
//! A line is split into whitespace-separated tokens, with double quotes
//! grouping a token that contains spaces. The first token picks the verb.
//! `write` is the exception: everything after the file name is content,
//! taken verbatim apart from `\n`, `\t` and `\\` escapes.

use std::str::FromStr;

use arbor_kernel::GrepOptions;
use strum::EnumString;
use thiserror::Error;

use crate::history::OperationKind;

/// Flags `grep` accepts in `-xyz` clusters.
pub const GREP_FLAGS: &str = "icrvn";

/// Command verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Verb {
    Mkdir,
    Rmdir,
    Cd,
    Ls,
    Touch,
    Write,
    Cat,
    Rm,
    Tree,
    Pwd,
    Grep,
    History,
    Help,
    #[strum(serialize = "exit", serialize = "quit")]
    Exit,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mkdir(String),
    Rmdir(String),
    Cd(String),
    Ls,
    Touch(String),
    Write { name: String, content: String },
    Cat(String),
    Rm(String),
    Tree,
    Pwd,
    Grep(GrepCommand),
    GrepHelp,
    History(HistoryCommand),
    Help,
    Exit,
}

/// `grep [-flags] <pattern> [file]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrepCommand {
    pub pattern: String,
    pub file: Option<String>,
    /// Flag characters in the order given, deduplicated.
    pub flags: String,
}

impl GrepCommand {
    /// Apply this command's flags and target on top of `defaults`.
    pub fn options(&self, defaults: &GrepOptions) -> GrepOptions {
        let mut options = defaults.clone();
        for flag in self.flags.chars() {
            match flag {
                'i' => options.case_insensitive = true,
                'c' => options.count_only = true,
                'r' => options.recursive = true,
                'v' => options.invert_match = true,
                'n' => options.show_line_numbers = true,
                _ => {}
            }
        }
        options.target_file = self.file.clone();
        options
    }

    pub fn operation(&self) -> OperationKind {
        match (&self.file, self.flags.as_str()) {
            (Some(_), _) => OperationKind::GrepFile,
            (None, "") => OperationKind::Grep,
            (None, "r") => OperationKind::GrepRecursive,
            (None, _) => OperationKind::GrepOptions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommand {
    /// Show everything, or only the last `n` entries.
    Show(Option<usize>),
    Clear,
}

/// Error type for command parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("Wrong command! {0:?} is not a command (try `help`)")]
    UnknownCommand(String),

    #[error("{verb}: missing {argument}")]
    MissingArgument {
        verb: &'static str,
        argument: &'static str,
    },

    #[error("{verb}: unexpected argument {argument:?}")]
    UnexpectedArgument { verb: &'static str, argument: String },

    #[error("Invalid count {0:?}. Please specify a positive number.")]
    InvalidCount(String),

    #[error("grep: unknown option -{0} (try `grep --help`)")]
    UnknownFlag(char),
}

impl Command {
    /// The history kind this command records under, if it is recorded.
    pub fn operation(&self) -> Option<OperationKind> {
        let kind = match self {
            Command::Mkdir(_) => OperationKind::CreateFolder,
            Command::Rmdir(_) => OperationKind::RemoveFolder,
            Command::Cd(_) => OperationKind::ChangeDir,
            Command::Ls => OperationKind::ListItems,
            Command::Touch(_) => OperationKind::CreateFile,
            Command::Write { .. } => OperationKind::WriteFile,
            Command::Cat(_) => OperationKind::ReadFile,
            Command::Rm(_) => OperationKind::RemoveFile,
            Command::Tree => OperationKind::ShowTree,
            Command::Pwd => OperationKind::ShowPath,
            Command::Grep(grep) => grep.operation(),
            Command::GrepHelp => OperationKind::GrepHelp,
            Command::History(_) | Command::Help | Command::Exit => return None,
        };
        Some(kind)
    }

    /// Name the command acts on, for the history log.
    pub fn target(&self) -> &str {
        match self {
            Command::Mkdir(name)
            | Command::Rmdir(name)
            | Command::Cd(name)
            | Command::Touch(name)
            | Command::Cat(name)
            | Command::Rm(name)
            | Command::Write { name, .. } => name.as_str(),
            Command::Grep(grep) => grep.file.as_deref().unwrap_or(&grep.pattern),
            _ => "",
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse(line)
    }
}

/// Parse one command line.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let Some((head, rest)) = next_token(line) else {
        return Err(ParseError::Empty);
    };
    let verb = Verb::from_str(&head).map_err(|_| ParseError::UnknownCommand(head.clone()))?;

    let args = tokenize(rest);
    match verb {
        Verb::Mkdir => one_arg(&args, "mkdir", "folder name").map(Command::Mkdir),
        Verb::Rmdir => one_arg(&args, "rmdir", "folder name").map(Command::Rmdir),
        Verb::Cd => one_arg(&args, "cd", "folder name").map(Command::Cd),
        Verb::Touch => one_arg(&args, "touch", "file name").map(Command::Touch),
        Verb::Cat => one_arg(&args, "cat", "file name").map(Command::Cat),
        Verb::Rm => one_arg(&args, "rm", "file name").map(Command::Rm),
        Verb::Ls => no_args(&args, "ls").map(|_| Command::Ls),
        Verb::Tree => no_args(&args, "tree").map(|_| Command::Tree),
        Verb::Pwd => no_args(&args, "pwd").map(|_| Command::Pwd),
        Verb::Help => no_args(&args, "help").map(|_| Command::Help),
        Verb::Exit => Ok(Command::Exit),
        Verb::Grep => parse_grep(&args),
        Verb::History => parse_history(&args),
        Verb::Write => parse_write(rest),
    }
}

fn parse_write(rest: &str) -> Result<Command, ParseError> {
    let (name, content) = next_token(rest).ok_or(ParseError::MissingArgument {
        verb: "write",
        argument: "file name",
    })?;
    Ok(Command::Write {
        name,
        content: parse_content(content),
    })
}

fn parse_grep(args: &[String]) -> Result<Command, ParseError> {
    if args.first().map(String::as_str) == Some("--help") {
        return Ok(Command::GrepHelp);
    }

    let mut flags = String::new();
    let mut rest = args;
    while let Some((first, tail)) = rest.split_first() {
        let Some(cluster) = first.strip_prefix('-').filter(|c| !c.is_empty()) else {
            break;
        };
        for flag in cluster.chars() {
            if !GREP_FLAGS.contains(flag) {
                return Err(ParseError::UnknownFlag(flag));
            }
            if !flags.contains(flag) {
                flags.push(flag);
            }
        }
        rest = tail;
    }

    match rest {
        [] => Err(ParseError::MissingArgument {
            verb: "grep",
            argument: "pattern",
        }),
        [pattern] => Ok(Command::Grep(GrepCommand {
            pattern: pattern.clone(),
            file: None,
            flags,
        })),
        [pattern, file] => Ok(Command::Grep(GrepCommand {
            pattern: pattern.clone(),
            file: Some(file.clone()),
            flags,
        })),
        [_, _, extra, ..] => Err(ParseError::UnexpectedArgument {
            verb: "grep",
            argument: extra.clone(),
        }),
    }
}

fn parse_history(args: &[String]) -> Result<Command, ParseError> {
    match args {
        [] => Ok(Command::History(HistoryCommand::Show(None))),
        [word] if word == "clear" => Ok(Command::History(HistoryCommand::Clear)),
        [count] => match count.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Command::History(HistoryCommand::Show(Some(n)))),
            _ => Err(ParseError::InvalidCount(count.clone())),
        },
        [_, extra, ..] => Err(ParseError::UnexpectedArgument {
            verb: "history",
            argument: extra.clone(),
        }),
    }
}

fn one_arg(
    args: &[String],
    verb: &'static str,
    argument: &'static str,
) -> Result<String, ParseError> {
    match args {
        [] => Err(ParseError::MissingArgument { verb, argument }),
        [only] => Ok(only.clone()),
        [_, extra, ..] => Err(ParseError::UnexpectedArgument {
            verb,
            argument: extra.clone(),
        }),
    }
}

fn no_args(args: &[String], verb: &'static str) -> Result<(), ParseError> {
    match args.first() {
        None => Ok(()),
        Some(extra) => Err(ParseError::UnexpectedArgument {
            verb,
            argument: extra.clone(),
        }),
    }
}

/// Split a line into tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = line;
    while let Some((token, tail)) = next_token(rest) {
        tokens.push(token);
        rest = tail;
    }
    tokens
}

/// Take the next token off `input`, returning it with the unconsumed rest.
///
/// An unterminated quote runs to the end of the input.
fn next_token(input: &str) -> Option<(String, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }

    let mut token = String::new();
    let mut in_quotes = false;
    for (idx, ch) in input.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => return Some((token, &input[idx..])),
            c => token.push(c),
        }
    }
    Some((token, ""))
}

/// Content for `write`: leading whitespace dropped, one pair of surrounding
/// quotes stripped, escapes expanded.
fn parse_content(raw: &str) -> String {
    let raw = raw.trim_start();
    let raw = raw
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(raw);

    let mut content = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            content.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => content.push('\n'),
            Some('t') => content.push('\t'),
            Some('\\') => content.push('\\'),
            Some(other) => {
                content.push('\\');
                content.push(other);
            }
            None => content.push('\\'),
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grep(pattern: &str, file: Option<&str>, flags: &str) -> Command {
        Command::Grep(GrepCommand {
            pattern: pattern.into(),
            file: file.map(Into::into),
            flags: flags.into(),
        })
    }

    #[test]
    fn test_simple_verbs() {
        assert_eq!(parse("mkdir docs").unwrap(), Command::Mkdir("docs".into()));
        assert_eq!(parse("  cd   ..  ").unwrap(), Command::Cd("..".into()));
        assert_eq!(parse("ls").unwrap(), Command::Ls);
        assert_eq!(parse("tree").unwrap(), Command::Tree);
        assert_eq!(parse("quit").unwrap(), Command::Exit);
        assert_eq!(parse("exit").unwrap(), Command::Exit);
        assert_eq!(
            parse(r#"touch "my notes.txt""#).unwrap(),
            Command::Touch("my notes.txt".into())
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(
            parse("frobnicate x"),
            Err(ParseError::UnknownCommand("frobnicate".into()))
        );
        assert_eq!(
            parse("mkdir"),
            Err(ParseError::MissingArgument {
                verb: "mkdir",
                argument: "folder name"
            })
        );
        assert!(matches!(
            parse("rm a b"),
            Err(ParseError::UnexpectedArgument { verb: "rm", .. })
        ));
        assert!(parse("MKDIR docs").is_err());
    }

    #[test]
    fn test_write_takes_rest_of_line() {
        assert_eq!(
            parse("write a.txt hello world").unwrap(),
            Command::Write {
                name: "a.txt".into(),
                content: "hello world".into()
            }
        );
        assert_eq!(
            parse(r"write a.txt one\ntwo  \ttab").unwrap(),
            Command::Write {
                name: "a.txt".into(),
                content: "one\ntwo  \ttab".into()
            }
        );
        assert_eq!(
            parse(r#"write a.txt "quoted  text""#).unwrap(),
            Command::Write {
                name: "a.txt".into(),
                content: "quoted  text".into()
            }
        );
        assert_eq!(
            parse("write a.txt").unwrap(),
            Command::Write {
                name: "a.txt".into(),
                content: String::new()
            }
        );
        assert!(parse("write").is_err());
    }

    #[test]
    fn test_grep_forms() {
        assert_eq!(parse("grep hello").unwrap(), grep("hello", None, ""));
        assert_eq!(
            parse("grep hello a.txt").unwrap(),
            grep("hello", Some("a.txt"), "")
        );
        assert_eq!(parse("grep -ir hello").unwrap(), grep("hello", None, "ir"));
        assert_eq!(parse("grep -i -r -i x").unwrap(), grep("x", None, "ir"));
        assert_eq!(parse("grep --help").unwrap(), Command::GrepHelp);
        assert_eq!(parse("grep -x foo"), Err(ParseError::UnknownFlag('x')));
        assert!(matches!(
            parse("grep -r"),
            Err(ParseError::MissingArgument { verb: "grep", .. })
        ));
        assert_eq!(
            parse(r#"grep "two words" f"#).unwrap(),
            grep("two words", Some("f"), "")
        );
    }

    #[test]
    fn test_grep_operation_kinds() {
        let kind = |line: &str| parse(line).unwrap().operation();
        assert_eq!(kind("grep a"), Some(OperationKind::Grep));
        assert_eq!(kind("grep a f"), Some(OperationKind::GrepFile));
        assert_eq!(kind("grep -r a"), Some(OperationKind::GrepRecursive));
        assert_eq!(kind("grep -ic a"), Some(OperationKind::GrepOptions));
        assert_eq!(kind("grep --help"), Some(OperationKind::GrepHelp));
        assert_eq!(kind("history"), None);
    }

    #[test]
    fn test_grep_options_from_flags() {
        let Command::Grep(cmd) = parse("grep -cv x notes").unwrap() else {
            panic!("expected grep");
        };
        let options = cmd.options(&GrepOptions::default());
        assert!(options.count_only);
        assert!(options.invert_match);
        assert!(!options.recursive);
        assert_eq!(options.target_file.as_deref(), Some("notes"));
    }

    #[test]
    fn test_history_forms() {
        assert_eq!(
            parse("history").unwrap(),
            Command::History(HistoryCommand::Show(None))
        );
        assert_eq!(
            parse("history 5").unwrap(),
            Command::History(HistoryCommand::Show(Some(5)))
        );
        assert_eq!(
            parse("history clear").unwrap(),
            Command::History(HistoryCommand::Clear)
        );
        assert_eq!(
            parse("history 0"),
            Err(ParseError::InvalidCount("0".into()))
        );
        assert_eq!(
            parse("history lots"),
            Err(ParseError::InvalidCount("lots".into()))
        );
    }

    #[test]
    fn test_targets() {
        assert_eq!(parse("touch a.txt").unwrap().target(), "a.txt");
        assert_eq!(parse("write b hi").unwrap().target(), "b");
        assert_eq!(parse("grep pat").unwrap().target(), "pat");
        assert_eq!(parse("grep pat file").unwrap().target(), "file");
        assert_eq!(parse("ls").unwrap().target(), "");
    }
}
