use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::EnvFilter;
use zodgen::cli::CommandLineInterface;

fn main() -> ExitCode {
    let command_line_interface = CommandLineInterface::load();

    let default_level = if command_line_interface.verbose() { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match command_line_interface.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
