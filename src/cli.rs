use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "streamfix")]
#[command(
    about = "Migrates deprecated engine.setStream calls to StreamUpdate builders",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Project root the batch file paths are relative to
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Rules file (defaults to .streamfix.toml found from the root upwards)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report what would change without writing files
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Migrate the operation and engine test files
    Tests,

    /// Migrate the call sites the first pass left behind
    Remaining,

    /// Rewrite captor assertions in SetExecutorTest
    SetExecutor,

    /// Migrate a single file
    File {
        /// File to migrate, relative to the root
        path: PathBuf,

        /// First identifier number to hand out
        #[arg(long, default_value = "1")]
        seed: usize,

        /// Identifier prefix for generated bindings
        #[arg(long, default_value = "update")]
        prefix: String,
    },
}

impl Cli {
    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
