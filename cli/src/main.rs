#![allow(clippy::exit)]

mod cli;
mod commands;
mod output;
mod timing;

use anyhow::Result;
use clap::Parser as _;
use dropzone_business::{BusinessConfig, SubmitOutcome};

use cli::{Cli, Commands};
use output::{ConsoleView, Output};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    timing::init_tracing(cli.verbose, cli.timing);

    match cli.command {
        Commands::Upload {
            files,
            server,
            path,
        } => {
            let config = BusinessConfig::new(server).with_upload_path(path);
            let view = ConsoleView::new(Output::new());
            let outcome = commands::run_upload(config, &files, view).await?;
            if !matches!(outcome, SubmitOutcome::Uploaded(_)) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            commands::generate_completions(shell);
            Ok(())
        }
    }
}
