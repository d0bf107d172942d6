// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `shuttle-exec`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shuttle-exec",
    version,
    about = "Run plan action shell scripts in a supervised child process.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SHUTTLE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Execute a shell fragment as a supervised child process.
    Run {
        /// Shell fragment to execute via `sh -c`.
        script: String,

        /// Name identifying the script in diagnostics.
        #[arg(long, value_name = "NAME", default_value = "shell")]
        name: String,

        /// Project directory the script runs in.
        ///
        /// Default: the current working directory.
        #[arg(long, value_name = "PATH")]
        project_path: Option<PathBuf>,

        /// Resolved local plan directory.
        ///
        /// Default: `<project>/.shuttle/plan`.
        #[arg(long, value_name = "PATH")]
        plan_path: Option<PathBuf>,

        /// Temp directory handed to the script.
        ///
        /// Default: `<project>/.shuttle/temp`.
        #[arg(long, value_name = "PATH")]
        tmp_path: Option<PathBuf>,

        /// Script argument as `KEY=VALUE`; may be repeated.
        ///
        /// Explicit flags win over entries from `--args-file`.
        #[arg(long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,

        /// TOML file with an `[args]` table of script arguments.
        #[arg(long, value_name = "PATH")]
        args_file: Option<PathBuf>,
    },

    /// Print the deterministic cache path for a compiled actions binary.
    BinaryPath {
        /// Actions source file to hash.
        source: PathBuf,

        /// Shuttle cache directory the binary lives under.
        #[arg(long, value_name = "PATH", default_value = ".shuttle")]
        shuttle_dir: PathBuf,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
