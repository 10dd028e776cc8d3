//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::{
    cli::{Cli, CompletionsArgs, Shell},
    error::CliResult,
};

const BIN: &str = "formkit";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    let out = &mut io::stdout();

    match args.shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, BIN, out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, BIN, out),
        Shell::Fish => generate(shells::Fish, &mut cmd, BIN, out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, BIN, out),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, BIN, out),
    }

    Ok(())
}
