use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Pipeline XML file
    pub input: PathBuf,

    /// Path to rewire.toml (defaults to the nearest one above the input)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::explain(&self.input, self.config.as_deref()).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
