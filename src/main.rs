use clap::Parser;
use std::process::ExitCode;

use cabinet::cli::Cli;
use cabinet::{commands, logging, ui};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_format);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            ui::alert(&e);
            ExitCode::FAILURE
        },
    }
}
