// ABOUTME: Shell completion scripts for cloudsearch, generated from the clap command tree
// ABOUTME: Also tells the user where each shell expects its completion file

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

const BIN_NAME: &str = "cloudsearch";

/// Write the completion script for `shell` covering every cloudsearch subcommand
pub fn write_completions<W: Write>(shell: Shell, writer: &mut W) {
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, writer);
}

/// Where `shell` looks for completion files, as a ready-to-run command
fn install_command(shell: Shell) -> String {
    match shell {
        Shell::Bash => format!(
            "{BIN_NAME} completions bash > ~/.local/share/bash-completion/completions/{BIN_NAME}"
        ),
        Shell::Zsh => format!(
            "{BIN_NAME} completions zsh > ~/.zfunc/_{BIN_NAME}\n  # add fpath=(~/.zfunc $fpath) before compinit in ~/.zshrc"
        ),
        Shell::Fish => format!(
            "{BIN_NAME} completions fish > ~/.config/fish/completions/{BIN_NAME}.fish"
        ),
        Shell::PowerShell => format!(
            "{BIN_NAME} completions powershell >> $PROFILE"
        ),
        Shell::Elvish => format!(
            "{BIN_NAME} completions elvish > ~/.config/elvish/lib/{BIN_NAME}.elv\n  # then `use {BIN_NAME}` in ~/.config/elvish/rc.elv"
        ),
        other => format!("{BIN_NAME} completions {other} > <completion dir for {other}>"),
    }
}

/// Installation steps for one shell's completion script
pub fn installation_instructions(shell: Shell) -> String {
    format!(
        "Shell Completion Installation ({shell})\n\n  {}\n\nRestart the shell or source the file to pick up the completions.\n",
        install_command(shell)
    )
}
