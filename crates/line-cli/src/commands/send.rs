//! `linebot push|multicast|broadcast|narrowcast|progress`: send messages.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use line_messaging::narrowcast::NarrowcastProgressResponse;
use line_messaging::{DemographicFilterObject, Message, NarrowcastRequest, RecipientObject, SendOptions};

use super::{read_json, report, Context, OutputFormat};

/// Flags shared by every send command.
#[derive(Args)]
pub struct SendFlags {
    /// JSON file with one message or an array of up to 5.
    pub file: PathBuf,

    /// Deliver without a notification sound.
    #[arg(long)]
    pub silent: bool,

    /// Attach a fresh X-Line-Retry-Key.
    #[arg(long)]
    pub retry_key: bool,
}

impl SendFlags {
    fn options(&self) -> SendOptions {
        let base = if self.retry_key {
            SendOptions::with_retry_key()
        } else {
            SendOptions::default()
        };
        SendOptions {
            notification_disabled: self.silent,
            ..base
        }
    }

    fn messages(&self) -> anyhow::Result<Vec<Message>> {
        read_messages(&self.file)
    }
}

#[derive(Args)]
pub struct PushArgs {
    /// User, group or room ID.
    #[arg(long)]
    pub to: String,

    #[command(flatten)]
    pub send: SendFlags,
}

#[derive(Args)]
pub struct MulticastArgs {
    /// Comma-separated user IDs.
    #[arg(long, value_delimiter = ',', required = true)]
    pub to: Vec<String>,

    #[command(flatten)]
    pub send: SendFlags,
}

#[derive(Args)]
pub struct BroadcastArgs {
    #[command(flatten)]
    pub send: SendFlags,
}

#[derive(Args)]
pub struct NarrowcastArgs {
    #[command(flatten)]
    pub send: SendFlags,

    /// JSON file with a recipient tree.
    #[arg(long)]
    pub recipient: Option<PathBuf>,

    /// JSON file with a demographic filter tree.
    #[arg(long)]
    pub demographic: Option<PathBuf>,

    /// Deliver to at most this many recipients.
    #[arg(long)]
    pub max: Option<u64>,
}

#[derive(Args)]
pub struct ProgressArgs {
    /// The id returned by `linebot narrowcast`.
    pub request_id: String,
}

/// A file may hold one message object or an array of them.
fn read_messages(path: &std::path::Path) -> anyhow::Result<Vec<Message>> {
    let value: serde_json::Value = read_json(path)?;
    let messages = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(messages)
}

pub async fn push(ctx: &Context, args: PushArgs) -> anyhow::Result<()> {
    let messages = args.send.messages()?;
    ctx.client()?
        .push(args.to.as_str(), messages, args.send.options())
        .await
        .map_err(|e| report(ctx.output, e))?;
    ctx.done(&format!("pushed to {}", args.to))
}

pub async fn multicast(ctx: &Context, args: MulticastArgs) -> anyhow::Result<()> {
    let messages = args.send.messages()?;
    let count = args.to.len();
    ctx.client()?
        .multicast(args.to, messages, args.send.options())
        .await
        .map_err(|e| report(ctx.output, e))?;
    ctx.done(&format!("multicast to {count} user(s)"))
}

pub async fn broadcast(ctx: &Context, args: BroadcastArgs) -> anyhow::Result<()> {
    let messages = args.send.messages()?;
    ctx.client()?
        .broadcast(messages, args.send.options())
        .await
        .map_err(|e| report(ctx.output, e))?;
    ctx.done("broadcast sent")
}

pub async fn narrowcast(ctx: &Context, args: NarrowcastArgs) -> anyhow::Result<()> {
    let mut request = NarrowcastRequest::new(args.send.messages()?);
    if let Some(path) = &args.recipient {
        let recipient: RecipientObject = read_json(path)?;
        request = request.recipient(recipient);
    }
    if let Some(path) = &args.demographic {
        let demographic: DemographicFilterObject = read_json(path)?;
        request = request.demographic(demographic);
    }
    if let Some(max) = args.max {
        request = request.max(max);
    }

    let request_id = ctx
        .client()?
        .narrowcast(request, args.send.options())
        .await
        .map_err(|e| report(ctx.output, e))?;

    match ctx.output {
        OutputFormat::Json => ctx.print_json(&serde_json::json!({ "requestId": request_id })),
        OutputFormat::Text => {
            println!("  {} narrowcast accepted", "✓".green().bold());
            println!("  {} {}", "request id:".dimmed(), request_id.bold());
            println!("  {} linebot progress {request_id}", "→".dimmed());
            Ok(())
        }
    }
}

pub async fn progress(ctx: &Context, args: ProgressArgs) -> anyhow::Result<()> {
    let progress = ctx.client()?.narrowcast_progress(&args.request_id).await?;
    match ctx.output {
        OutputFormat::Json => ctx.print_json(&progress),
        OutputFormat::Text => {
            print_progress(&progress);
            Ok(())
        }
    }
}

fn print_progress(progress: &NarrowcastProgressResponse) {
    let count = |n: Option<u64>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
    println!("\n  {:<12} {:?}", "PHASE".bold(), progress.phase);
    println!("  {:<12} {}", "SUCCESS".bold(), count(progress.success_count));
    println!("  {:<12} {}", "FAILURE".bold(), count(progress.failure_count));
    println!("  {:<12} {}", "TARGET".bold(), count(progress.target_count));
    if let Some(description) = &progress.failed_description {
        println!("  {:<12} {}", "FAILED".red().bold(), description);
    }
    if let Some(code) = progress.error_code {
        println!("  {:<12} {}", "ERROR CODE".bold(), code);
    }
    println!();
}
