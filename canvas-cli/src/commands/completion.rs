//! Shell completion scripts for the CLI.

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

/// Writes the completion script for `shell` to stdout.
pub fn generate_completion(shell: Shell) {
    let mut app = crate::Cli::command();
    generate(shell, &mut app, "canvas", &mut io::stdout());
}
