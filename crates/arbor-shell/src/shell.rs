//! The command facade: one [`Shell`] owns an engine and its history, and
//! turns command lines into [`Reply`] values.

use std::io::{self, Write};

use arbor_kernel::{Engine, GrepEngine};
use arbor_types::EngineError;
use serde::Serialize;

use crate::command::{Command, HistoryCommand, ParseError, parse};
use crate::config::ShellConfig;
use crate::history::History;
use crate::render;

/// Result of one command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub ok: bool,
    /// Rendered output or error message. May be empty.
    pub output: String,
    /// Current path after the command ran.
    pub path: String,
    /// The command asked to leave the loop.
    #[serde(skip)]
    pub exit: bool,
}

pub struct Shell {
    engine: Engine,
    history: History,
    config: ShellConfig,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            engine: Engine::with_base_name(config.base_folder.clone()),
            history: History::with_capacity(config.history_limit),
            config,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// `<path><suffix>`, e.g. `BaseFolder/docs>  `.
    pub fn prompt(&self) -> String {
        format!("{}{}", self.engine.current_path(), self.config.prompt_suffix)
    }

    /// Parse and run one command line.
    ///
    /// Engine-backed commands are recorded in history whether or not they
    /// succeed. Parse failures are not recorded. A trailing line ending, as
    /// left by `read_line`, is not part of the command.
    pub fn execute(&mut self, line: &str) -> Reply {
        let line = line.trim_end_matches(['\r', '\n']);
        let command = match parse(line) {
            Ok(command) => command,
            Err(ParseError::Empty) => return self.reply(true, String::new()),
            Err(err) => return self.reply(false, err.to_string()),
        };
        tracing::debug!(command = ?command, "executing");

        if command == Command::Exit {
            let mut reply = self.reply(true, String::new());
            reply.exit = true;
            return reply;
        }

        let result = self.dispatch(&command);
        if let Some(kind) = command.operation() {
            self.history
                .record(line.trim(), kind, command.target(), self.engine.current_path());
        }

        match result {
            Ok(output) => self.reply(true, output),
            Err(err) => self.reply(false, err.to_string()),
        }
    }

    /// Run `lines` in order and write each reply to `out`, stopping after
    /// `exit`. Blank lines and `#` comments are skipped. Returns how many
    /// lines were executed.
    pub fn run_lines<'l>(
        &mut self,
        lines: impl IntoIterator<Item = &'l str>,
        out: &mut impl Write,
        json: bool,
    ) -> io::Result<usize> {
        let mut executed = 0;
        for line in lines.into_iter().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let reply = self.execute(line);
            executed += 1;
            emit(out, &reply, json)?;
            if reply.exit {
                break;
            }
        }
        Ok(executed)
    }

    fn dispatch(&mut self, command: &Command) -> Result<String, EngineError> {
        let cwd = self.engine.current_folder_id();
        let output = match command {
            Command::Mkdir(name) => {
                let id = self.engine.create_folder(cwd, name)?;
                render::folder_created(id, name)
            }
            Command::Rmdir(name) => render::removed(&self.engine.remove_folder(name)?),
            Command::Cd(name) => {
                self.engine.change_directory(name)?;
                String::new()
            }
            Command::Ls => render::listing(&self.engine.list_children(cwd)?),
            Command::Touch(name) => {
                let id = self.engine.create_file(cwd, name)?;
                render::file_created(id, name, cwd)
            }
            Command::Write { name, content } => {
                self.engine.set_content(name, content.as_str())?;
                render::content_written(name, content.len())
            }
            Command::Cat(name) => self.engine.read_file(name)?.to_string(),
            Command::Rm(name) => render::removed(&[self.engine.remove_file(name)?]),
            Command::Tree => render::tree(&self.engine.tree(cwd)?),
            Command::Pwd => self.engine.current_path(),
            Command::Grep(grep) => {
                let options = grep.options(&self.config.grep.to_options());
                let matches = GrepEngine::new(&self.engine).search(&grep.pattern, &options)?;
                render::grep_results(&matches, &options)
            }
            Command::GrepHelp => render::GREP_HELP.to_string(),
            Command::History(HistoryCommand::Show(None)) => {
                render::history_table("Command History:", self.history.entries())
            }
            Command::History(HistoryCommand::Show(Some(count))) => render::history_table(
                &format!("Recent Command History (last {count} commands):"),
                self.history.recent(*count),
            ),
            Command::History(HistoryCommand::Clear) => {
                self.history.clear();
                "History cleared successfully.".to_string()
            }
            Command::Help => render::COMMAND_HELP.to_string(),
            Command::Exit => String::new(),
        };
        Ok(output)
    }

    fn reply(&self, ok: bool, output: String) -> Reply {
        Reply {
            ok,
            output,
            path: self.engine.current_path(),
            exit: false,
        }
    }
}

/// Write one reply: a JSON object per line with `json`, otherwise the bare
/// output (nothing at all when it is empty).
pub fn emit(out: &mut impl Write, reply: &Reply, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, reply)?;
        writeln!(out)?;
    } else if !reply.output.is_empty() {
        writeln!(out, "{}", reply.output)?;
    }
    Ok(())
}
