//! SMITE - advisory hooks for Claude Code
//!
//! CLI entry point with global panic handler.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use smite::config::{crash_log_path, smite_home, Config};
use smite::error::exit_codes;
use smite::hooks::{emit_stderr, HookRunner, HookType};
use smite::storage::FileStateStore;

// =============================================================================
// CLI Definition
// =============================================================================

/// SMITE - advisory hooks for Claude Code
#[derive(Parser)]
#[command(name = "smite")]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// [Internal] Run a hook (JSON stdin, advisories on stderr). Called by Claude Code hooks
    Hook {
        /// The hook to run
        #[arg(value_enum)]
        event: HookEvent,
    },

    /// [User] Show the task-progress counter
    Status {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// [User] Initialize SMITE configuration
    Init {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Force overwrite existing files
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum HookEvent {
    BashValidate,
    GrepValidate,
    PromptCheck,
    SessionStart,
    TaskProgress,
}

impl From<HookEvent> for HookType {
    fn from(event: HookEvent) -> Self {
        match event {
            HookEvent::BashValidate => HookType::BashValidate,
            HookEvent::GrepValidate => HookType::GrepValidate,
            HookEvent::PromptCheck => HookType::PromptCheck,
            HookEvent::SessionStart => HookType::SessionStart,
            HookEvent::TaskProgress => HookType::TaskProgress,
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();
    init_tracing();

    match run() {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!(error = %e, "smite failed");
            ExitCode::from(exit_codes::SUCCESS as u8) // Fail-open
        }
    }
}

/// Send diagnostics to stderr, filtered by `SMITE_LOG` (default: errors only).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SMITE_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Set up the global panic handler.
///
/// On panic, appends to `~/.smite/crash.log` and exits 0 so a crashing hook
/// never blocks the session.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("smite panic: {}", info);

        let crash_log = crash_log_path();
        if let Some(parent) = crash_log.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&crash_log)
        {
            let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
            let _ = writeln!(file, "[{}] {}", timestamp, info);
        }

        std::process::exit(exit_codes::SUCCESS);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) if swallow_parse_error(&e, &args) => {
            tracing::warn!(error = %e, "invalid hook invocation, ignoring");
            return Ok(ExitCode::from(exit_codes::SUCCESS as u8));
        }
        Err(e) => e.exit(),
    };

    match cli.command {
        Commands::Hook { event } => Ok(run_hook(event.into())),
        Commands::Status { json, quiet } => run_status(json, quiet),
        Commands::Init { json, quiet, force } => run_init(json, quiet, force),
    }
}

/// Whether a command-line error should be ignored rather than reported.
///
/// A misconfigured hook (unknown name, missing argument) must not fail the
/// host, so errors under `hook` are swallowed. Help and version output, and
/// errors for the user commands, go through clap as usual.
fn swallow_parse_error(err: &clap::Error, args: &[OsString]) -> bool {
    let is_hook = args.get(1).is_some_and(|arg| arg == "hook");
    let is_display = matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    );
    is_hook && !is_display
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Run one hook. Always exits 0.
fn run_hook(hook_type: HookType) -> ExitCode {
    let config = Config::load();
    let store = FileStateStore::new(&config);
    let runner = HookRunner::new(store, config);

    let report = runner.run(hook_type);
    if let Err(e) = emit_stderr(&report.advisories) {
        tracing::warn!(error = %e, "failed to write advisories");
    }

    ExitCode::from(exit_codes::SUCCESS as u8)
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn run_status(json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smite::cli::status::{StatusCommand, StatusOptions};

    let config = Config::load();
    let store = FileStateStore::new(&config);

    let cmd = StatusCommand::new(store);
    let options = StatusOptions { json, quiet };

    let output = cmd.run();
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_init(json: bool, quiet: bool, force: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smite::cli::init::{InitCommand, InitOptions};

    let cmd = InitCommand::new(smite_home());
    let options = InitOptions { json, quiet, force };

    let output = cmd.run(&options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

// =============================================================================
// Tests
// =============================================================================
