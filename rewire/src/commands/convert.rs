use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    inputs, ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ConvertCommand {
    /// Pipeline XML files, or directories containing them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Path to rewire.toml (defaults to the nearest one above each input)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a JSON snapshot of every pipeline phase into this directory
    #[arg(long, value_name = "DIR")]
    pub snapshots: Option<PathBuf>,
}

impl ConvertCommand {
    /// Run the convert command
    pub fn run(&self) -> Result<()> {
        let files = inputs::collect(&self.inputs).unwrap_or_exit();

        let report = ops::convert(
            &files,
            ops::convert::ConvertOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
                config: self.config.as_deref(),
                snapshot_dir: self.snapshots.as_deref(),
            },
        );
        report.render(&mut TerminalOutput::new());

        if report.has_failures() {
            std::process::exit(1);
        }
        Ok(())
    }
}
