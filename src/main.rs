mod auth;
mod cli;
mod config;
mod error;
mod gate;
mod outcomes;
mod output;
mod providers;
mod workflow;

use clap::Parser;
use cli::Cli;
use log::info;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting required status check");

    output::finish(cli.execute().await, &mut std::io::stdout())
}
