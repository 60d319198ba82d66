mod check;
mod completions;
mod convert;
mod explain;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use convert::ConvertCommand;
use eyre::Result;
use explain::ExplainCommand;
use tracing_subscriber::EnvFilter;

use crate::ops::describe_error;

/// Extension trait for exiting on fatal errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{}", describe_error(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "rewire")]
#[command(version)]
#[command(about = "Convert pipeline XML definitions into JavaScript controllers")]
pub(crate) struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Install the log subscriber. Logs go to stderr so previews stay clean.
    pub fn init_tracing(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Convert(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert pipeline documents into controller modules
    Convert(ConvertCommand),

    /// Parse and analyze pipeline documents without generating code
    Check(CheckCommand),

    /// Show the reconstructed control flow of a pipeline
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
