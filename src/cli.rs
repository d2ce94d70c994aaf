//! Command-line interface for par-trace.
//!
//! `render` draws a captured error from a JSON dump; `snippet` highlights a
//! window of a source file directly.

use crate::highlighter::{DEFAULT_CONTEXT, Highlighter};
use crate::output::{OutputSink, TerminalOutput};
use crate::trace::{CapturedError, ExceptionTrace};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use par_trace_config::{ColorChoice, Config, MAX_CONTEXT_LINES, Verbosity};
use std::io::Read;
use std::path::{Path, PathBuf};

/// par-trace - Syntax-highlighted exception traces for the terminal
#[derive(Parser)]
#[command(name = "par-trace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set debug log level (overrides DEBUG_LEVEL and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Color argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

/// Options shared by every subcommand that writes to the terminal.
#[derive(Debug, Clone, clap::Args)]
pub struct OutputArgs {
    /// Increase verbosity (-v shows the stack trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (default: ~/.config/par-trace/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorArg>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a captured error from a JSON dump
    Render {
        /// Dump file, or `-` for stdin
        #[arg(value_name = "DUMP")]
        dump: PathBuf,

        /// Only print the error message
        #[arg(long)]
        simple: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print a highlighted window of a source file
    Snippet {
        /// Source file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// 1-based line to mark
        #[arg(long)]
        line: usize,

        /// Lines shown before the marked line
        #[arg(long, default_value_t = DEFAULT_CONTEXT, value_parser = parse_context_lines)]
        before: usize,

        /// Lines shown after the marked line
        #[arg(long, default_value_t = DEFAULT_CONTEXT, value_parser = parse_context_lines)]
        after: usize,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Context size argument, capped like the config file's context sizes.
fn parse_context_lines(value: &str) -> Result<usize, String> {
    let lines: usize = value.parse().map_err(|e| format!("{e}"))?;
    if lines > MAX_CONTEXT_LINES {
        return Err(format!("{lines} is more than {MAX_CONTEXT_LINES} lines"));
    }
    Ok(lines)
}

/// Runtime options passed from CLI parsing to the command runner
#[derive(Debug)]
pub struct RuntimeOptions {
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
    pub command: Commands,
}

/// Parse CLI arguments. Exits the process on `--help`, `--version` or a
/// usage error.
pub fn process_cli() -> RuntimeOptions {
    let cli = Cli::parse();
    RuntimeOptions {
        log_level: cli.log_level.map(|l| l.to_level_filter()),
        command: cli.command,
    }
}

/// Run a parsed command against stdout.
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Render {
            dump,
            simple,
            output,
        } => {
            let config = load_config(output.config.as_deref())?;
            let json = read_input(&dump)?;
            let mut io = stdout_sink(&output, &config);
            render_dump(&json, &config, &mut io, simple)
        }
        Commands::Snippet {
            file,
            line,
            before,
            after,
            output,
        } => {
            let config = load_config(output.config.as_deref())?;
            let source = read_input(&file)?;
            let mut io = stdout_sink(&output, &config);
            render_snippet(&source, &file, line, before, after, &config, &mut io)
        }
    }
}

/// Explicit config file, or the default one when present.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Read a file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Verbosity from `-v`/`-q`, falling back to the config.
pub fn resolve_verbosity(args: &OutputArgs, config: &Config) -> Verbosity {
    if args.verbose > 0 || args.quiet {
        Verbosity::from_flags(args.verbose, args.quiet)
    } else {
        config.verbosity
    }
}

fn stdout_sink(args: &OutputArgs, config: &Config) -> TerminalOutput<std::io::Stdout> {
    let choice = args.color.map(ColorChoice::from).unwrap_or(config.color);
    TerminalOutput::stdout(resolve_verbosity(args, config), choice)
}

/// Parse a JSON dump and render it.
pub fn render_dump(
    json: &str,
    config: &Config,
    io: &mut dyn OutputSink,
    simple: bool,
) -> Result<()> {
    let error = CapturedError::from_json(json).context("invalid error dump")?;
    log::info!("Rendering captured {}", error.class_name);
    ExceptionTrace::new(&error)
        .with_theme(config.theme.clone())
        .with_context(config.context)
        .render(io, simple)?;
    Ok(())
}

/// Highlight `source` around `line` and write the window.
pub fn render_snippet(
    source: &str,
    path: &Path,
    line: usize,
    before: usize,
    after: usize,
    config: &Config,
    io: &mut dyn OutputSink,
) -> Result<()> {
    let highlighter = Highlighter::new(config.theme.highlight.clone());
    let snippet = highlighter
        .snippet_with_context(source, line, before, after)
        .with_context(|| format!("cannot highlight {}", path.display()))?;
    if snippet.is_empty() {
        log::warn!("Line {line} is outside {}", path.display());
    }
    for display in snippet {
        io.write_line(display.line)?;
    }
    Ok(())
}
