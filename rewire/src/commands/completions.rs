use std::io;

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use eyre::Result;

use super::Cli;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

impl CompletionsCommand {
    /// Print the completion script for the chosen shell to stdout
    pub fn run(&self) -> Result<()> {
        let mut cli = Cli::command();
        let bin = cli.get_name().to_string();
        clap_complete::generate(self.shell, &mut cli, bin, &mut io::stdout());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_completions_reference_every_subcommand() {
        let mut cli = Cli::command();
        let mut script = Vec::new();
        clap_complete::generate(Shell::Bash, &mut cli, "rewire", &mut script);
        let script = String::from_utf8(script).unwrap();
        for command in ["convert", "check", "explain"] {
            assert!(script.contains(command), "missing {}", command);
        }
    }

    #[test]
    fn test_unknown_shell_is_rejected() {
        assert!(Cli::try_parse_from(["rewire", "completions", "cmd"]).is_err());
    }
}
