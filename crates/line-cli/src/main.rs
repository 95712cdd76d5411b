//! linebot: validate and send LINE Messaging API payloads from the terminal.

mod commands;
mod telemetry;

use clap::Parser;
use commands::{execute, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose, cli.log_json);
    execute(cli).await
}
