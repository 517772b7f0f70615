//! CLI binary for the Artlinx sales dashboard

mod cli;
mod commands;
mod config;
mod render;

use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr so tables on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", commands::failure_message(&err));
            ExitCode::FAILURE
        }
    }
}
