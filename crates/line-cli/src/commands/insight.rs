//! `linebot insight`: delivery, follower and quota statistics.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use line_messaging::insight::InsightStatus;

use super::{Context, OutputFormat};

#[derive(Subcommand)]
pub enum InsightCommands {
    /// Messages delivered on a day.
    Deliveries(DateArgs),
    /// Friends on a day.
    Followers(DateArgs),
    /// Friend demographics.
    Demographics,
    /// Monthly message quota and usage.
    Quota,
}

#[derive(Args)]
pub struct DateArgs {
    /// Day to report, YYYY-MM-DD.
    #[arg(long)]
    pub date: NaiveDate,
}

pub async fn execute(ctx: &Context, cmd: InsightCommands) -> anyhow::Result<()> {
    let client = ctx.client()?;
    match cmd {
        InsightCommands::Deliveries(args) => {
            let stats = client.number_of_message_deliveries(args.date).await?;
            if ctx.output == OutputFormat::Json {
                return ctx.print_json(&stats);
            }
            status_line(stats.status);
            row("broadcast", stats.broadcast);
            row("targeting", stats.targeting);
            row("push", stats.api_push);
            row("multicast", stats.api_multicast);
            row("api bcast", stats.api_broadcast);
            row("reply", stats.api_reply);
        }
        InsightCommands::Followers(args) => {
            let stats = client.number_of_followers(args.date).await?;
            if ctx.output == OutputFormat::Json {
                return ctx.print_json(&stats);
            }
            status_line(stats.status);
            row("followers", stats.followers);
            row("reachable", stats.targeted_reaches);
            row("blocks", stats.blocks);
        }
        InsightCommands::Demographics => {
            let stats = client.friend_demographics().await?;
            if ctx.output == OutputFormat::Json {
                return ctx.print_json(&stats);
            }
            println!("\n  {}", "GENDER".bold());
            for share in &stats.genders {
                println!("    {:<16} {:>6.1}%", share.gender, share.percentage);
            }
            println!("\n  {}", "AGE".bold());
            for share in &stats.ages {
                println!("    {:<16} {:>6.1}%", share.age, share.percentage);
            }
        }
        InsightCommands::Quota => {
            let limit = client.target_limit().await?;
            let usage = client.messages_sent_this_month().await?;
            if ctx.output == OutputFormat::Json {
                return ctx.print_json(&serde_json::json!({ "limit": limit, "usage": usage }));
            }
            let limit = limit
                .value
                .map_or_else(|| "unlimited".to_string(), |v| v.to_string());
            println!("\n  {:<12} {}", "LIMIT".bold(), limit);
            println!("  {:<12} {}\n", "SENT".bold(), usage.total_usage);
        }
    }
    Ok(())
}

fn status_line(status: InsightStatus) {
    let label = match status {
        InsightStatus::Ready => "ready".green(),
        InsightStatus::Unready => "not ready yet".yellow(),
        InsightStatus::OutOfService => "out of service".red(),
    };
    println!("\n  {:<12} {}", "STATUS".bold(), label);
}

fn row(name: &str, value: Option<u64>) {
    let value = value.map_or_else(|| "-".to_string(), |v| v.to_string());
    println!("  {:<12} {}", name.to_uppercase().bold(), value);
}
