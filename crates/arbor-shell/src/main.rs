//! arbor: an interactive shell over an in-memory folder tree.
//!
//! Usage:
//!   # Interactive
//!   cargo run -p arbor-shell
//!
//!   # Run a script, one command per line
//!   cargo run -p arbor-shell -- --script session.txt
//!
//!   # One-off commands, JSON replies
//!   cargo run -p arbor-shell -- --json -c "mkdir docs" -c "ls"

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use arbor_shell::config::{self, ShellConfig};
use arbor_shell::render::COMMAND_HELP;
use arbor_shell::{Shell, emit};

/// In-memory hierarchical file system shell.
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(about = "Shell over an in-memory folder tree")]
struct Args {
    /// Run commands from a file (blank lines and # comments are skipped)
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Run this command and exit (repeatable)
    #[arg(short = 'c', long = "command", value_name = "COMMAND")]
    commands: Vec<String>,

    /// Config file (RON); defaults to ~/.config/arbor/config.ron
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Print each reply as a JSON object
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.as_deref().map(config::expand_path);
    let config = ShellConfig::load_or_default(config_path.as_deref())
        .context("failed to load config")?;

    // Logs go to stderr so they never mix with command output
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let mut shell = Shell::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.commands.is_empty() {
        shell.run_lines(args.commands.iter().map(String::as_str), &mut out, args.json)?;
        return Ok(());
    }

    if let Some(path) = &args.script {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        let executed = shell.run_lines(text.lines(), &mut out, args.json)?;
        tracing::info!(path = %path.display(), executed, "script finished");
        return Ok(());
    }

    repl(&mut shell, &mut out, args.json)
}

fn repl(shell: &mut Shell, out: &mut impl Write, json: bool) -> Result<()> {
    if shell.config().banner && !json {
        writeln!(out, "{COMMAND_HELP}")?;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        if !json {
            write!(out, "{}", shell.prompt())?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let reply = shell.execute(&line);
        emit(out, &reply, json)?;
        if reply.exit {
            break;
        }
    }

    tracing::debug!(commands = shell.history().len(), "session ended");
    Ok(())
}
