#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a Grid Arena skirmish from a script.

mod board;
mod scenario;
mod script;
mod session;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::session::Session;

/// Runs scripted moves and battles in a 10x10 arena.
#[derive(Debug, Parser)]
#[command(name = "grid-arena", version)]
struct CliArgs {
    /// Scenario TOML describing the hero and monsters; a built-in skirmish is used when omitted.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,
    /// Script line to execute, e.g. "move hero N" or "battle 0". Reads stdin when absent.
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    commands: Vec<String>,
    /// Tracing filter used when RUST_LOG is not set.
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log: String,
    /// Leave defeated monsters in the arena instead of removing them.
    #[arg(long)]
    no_reap: bool,
}

/// Entry point for the Grid Arena command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(&args.log);

    let arena = match &args.scenario {
        Some(path) => scenario::load(path)?,
        None => scenario::builtin()?,
    };
    let mut session = Session::new(arena, !args.no_reap);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.commands.is_empty() {
        let stdin = io::stdin();
        for (index, line) in stdin.lock().lines().enumerate() {
            let line = line.context("failed to read command from stdin")?;
            run_line(&mut session, index + 1, &line, &mut out)?;
        }
    } else {
        for (index, line) in args.commands.iter().enumerate() {
            run_line(&mut session, index + 1, line, &mut out)?;
        }
    }

    out.flush().context("failed to flush output")
}

fn run_line<W: Write>(
    session: &mut Session,
    number: usize,
    line: &str,
    out: &mut W,
) -> Result<()> {
    match script::parse_line(line) {
        Ok(Some(instruction)) => session
            .execute(instruction, out)
            .context("failed to write output")?,
        Ok(None) => {}
        Err(error) => {
            warn!(line = number, %error, "skipping unparseable command");
            writeln!(out, "line {number}: {error}").context("failed to write output")?;
        }
    }
    Ok(())
}

fn init_tracing(default_directive: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}
