use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    inputs, ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Pipeline XML files, or directories containing them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Path to rewire.toml (defaults to the nearest one above each input)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let files = inputs::collect(&self.inputs).unwrap_or_exit();

        let report = ops::check(&files, self.config.as_deref());
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
