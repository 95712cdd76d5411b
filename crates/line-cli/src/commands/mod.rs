//! CLI command definitions and dispatch.

pub mod insight;
pub mod rich_menu;
pub mod send;
pub mod validate;

use std::path::Path;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use colored::Colorize;
use line_messaging::{ClientConfig, LineClient, LineResult, ValidationErrors};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// linebot: LINE Messaging API from the terminal.
#[derive(Parser)]
#[command(
    name = "linebot",
    version,
    about = "Validate and send LINE Messaging API payloads",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Channel access token (overrides config).
    #[arg(long, global = true, env = "LINE_CHANNEL_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// API origin (overrides config).
    #[arg(long, global = true, env = "LINE_API_ORIGIN")]
    pub origin: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Debug logging.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Write logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a payload file offline and print its normalized form.
    Validate(validate::ValidateArgs),

    /// Print the JSON schema of a payload kind.
    Schema(validate::SchemaArgs),

    /// Send messages to one user, group or room.
    Push(send::PushArgs),

    /// Send messages to several users.
    Multicast(send::MulticastArgs),

    /// Send messages to every friend.
    Broadcast(send::BroadcastArgs),

    /// Send messages to a filtered audience.
    Narrowcast(send::NarrowcastArgs),

    /// Show the progress of a narrowcast.
    Progress(send::ProgressArgs),

    /// Manage rich menus.
    #[command(subcommand)]
    RichMenu(rich_menu::RichMenuCommands),

    /// Delivery, follower and quota statistics.
    #[command(subcommand)]
    Insight(insight::InsightCommands),
}

impl Commands {
    /// Commands that never reach the API.
    fn is_offline(&self) -> bool {
        matches!(self, Commands::Validate(_) | Commands::Schema(_))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Settings every command sees.
pub struct Context {
    pub output: OutputFormat,
    pub config: ClientConfig,
}

impl Context {
    /// Config file and environment, then flags.
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = settle_config(cli.command.is_offline(), ClientConfig::load)?;
        if let Some(token) = &cli.access_token {
            config.access_token = Some(token.clone());
        }
        if let Some(origin) = &cli.origin {
            config.origin = origin.clone();
        }
        Ok(Self {
            output: cli.output,
            config,
        })
    }

    pub fn client(&self) -> anyhow::Result<LineClient> {
        LineClient::from_config(&self.config).context("cannot build the LINE client")
    }

    /// Print `value` as pretty JSON.
    pub fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print the outcome of a call that returns nothing.
    pub fn done(&self, what: &str) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Json => println!("{}", serde_json::json!({ "ok": true })),
            OutputFormat::Text => println!("  {} {what}", "✓".green().bold()),
        }
        Ok(())
    }
}

/// An unreadable config file only fails commands that call the API; offline
/// commands continue with defaults plus the environment.
fn settle_config(offline: bool, load: impl FnOnce() -> LineResult<ClientConfig>) -> anyhow::Result<ClientConfig> {
    match load() {
        Ok(config) => Ok(config),
        Err(err) if offline => {
            tracing::warn!(error = %err, "ignoring unreadable config file");
            Ok(ClientConfig::default().with_env_overrides(|key| std::env::var(key).ok()))
        }
        Err(err) => Err(err).context("cannot load config"),
    }
}

/// Execute the CLI command.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::from_cli(&cli)?;
    match cli.command {
        Commands::Validate(args) => validate::validate(&ctx, args),
        Commands::Schema(args) => validate::schema(&ctx, args),
        Commands::Push(args) => send::push(&ctx, args).await,
        Commands::Multicast(args) => send::multicast(&ctx, args).await,
        Commands::Broadcast(args) => send::broadcast(&ctx, args).await,
        Commands::Narrowcast(args) => send::narrowcast(&ctx, args).await,
        Commands::Progress(args) => send::progress(&ctx, args).await,
        Commands::RichMenu(cmd) => rich_menu::execute(&ctx, cmd).await,
        Commands::Insight(cmd) => insight::execute(&ctx, cmd).await,
    }
}

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid payload", path.display()))
}

/// Print validation findings in the chosen format.
pub fn print_errors(output: OutputFormat, errors: &ValidationErrors) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(errors)?),
        OutputFormat::Text => {
            println!("\n  {} {} problem(s):\n", "✗".red().bold(), errors.len());
            for error in errors {
                println!(
                    "  {:<32} {} {}",
                    error.path.to_string().bold(),
                    format!("[{}]", error.constraint).yellow(),
                    error.detail
                );
            }
            println!();
        }
    }
    Ok(())
}

/// Turn a rejected send into printed findings plus a failing exit.
pub fn report(output: OutputFormat, err: line_messaging::LineError) -> anyhow::Error {
    if let Some(errors) = err.validation_errors() {
        if let Err(print_err) = print_errors(output, errors) {
            return print_err;
        }
        return anyhow::anyhow!("payload rejected with {} problem(s); nothing was sent", errors.len());
    }
    anyhow::Error::new(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use line_messaging::LineError;

    fn broken() -> LineResult<ClientConfig> {
        ClientConfig::from_toml("validation = \"deep\"\n")
    }

    #[test]
    fn test_offline_commands_survive_a_broken_config() {
        let config = settle_config(true, broken).unwrap();
        assert_eq!(config.validation, ClientConfig::default().validation);
    }

    #[test]
    fn test_online_commands_report_a_broken_config() {
        let err = settle_config(false, broken).unwrap_err();
        assert!(matches!(err.downcast_ref::<LineError>(), Some(LineError::Config(_))));
    }

    #[test]
    fn test_only_validate_and_schema_are_offline() {
        let cli = Cli::parse_from(["linebot", "validate", "payload.json"]);
        assert!(cli.command.is_offline());
        let cli = Cli::parse_from(["linebot", "schema", "--kind", "flex"]);
        assert!(cli.command.is_offline());
        let cli = Cli::parse_from(["linebot", "broadcast", "payload.json"]);
        assert!(!cli.command.is_offline());
    }
}
