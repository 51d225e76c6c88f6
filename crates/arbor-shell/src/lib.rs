//! # arbor-shell
//!
//! The command surface over [`arbor_kernel::Engine`]: a line parser, the
//! [`Shell`] facade that runs parsed commands and keeps a [`History`] log,
//! text rendering, and RON configuration. The `arbor` binary is a thin REPL
//! around [`Shell::execute`].

pub mod command;
pub mod config;
pub mod history;
pub mod render;
pub mod shell;

pub use command::{Command, GrepCommand, HistoryCommand, ParseError, Verb, parse};
pub use config::{ConfigError, GrepDefaults, ShellConfig};
pub use history::{DEFAULT_HISTORY_LIMIT, History, HistoryEntry, OperationKind};
pub use shell::{Reply, Shell, emit};
