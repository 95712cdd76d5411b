//! `linebot rich-menu`: manage rich menus.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use colored::Colorize;
use line_messaging::rich_menu::RichMenu;

use super::{read_json, report, Context, OutputFormat};

#[derive(Subcommand)]
pub enum RichMenuCommands {
    /// Register a rich menu from a JSON file.
    Create(CreateArgs),
    /// List registered rich menus.
    List,
    /// Delete a rich menu.
    Delete(IdArgs),
    /// Show a rich menu to one user.
    Link(LinkArgs),
    /// Make a rich menu the default for every user.
    Default(IdArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct IdArgs {
    pub rich_menu_id: String,
}

#[derive(Args)]
pub struct LinkArgs {
    pub user_id: String,
    pub rich_menu_id: String,
}

pub async fn execute(ctx: &Context, cmd: RichMenuCommands) -> anyhow::Result<()> {
    match cmd {
        RichMenuCommands::Create(args) => create(ctx, args).await,
        RichMenuCommands::List => list(ctx).await,
        RichMenuCommands::Delete(args) => {
            ctx.client()?.delete_rich_menu(&args.rich_menu_id).await?;
            ctx.done(&format!("deleted {}", args.rich_menu_id))
        }
        RichMenuCommands::Link(args) => {
            ctx.client()?.link_rich_menu(&args.user_id, &args.rich_menu_id).await?;
            ctx.done(&format!("linked {} to {}", args.rich_menu_id, args.user_id))
        }
        RichMenuCommands::Default(args) => {
            ctx.client()?.set_default_rich_menu(&args.rich_menu_id).await?;
            ctx.done(&format!("{} is now the default menu", args.rich_menu_id))
        }
    }
}

async fn create(ctx: &Context, args: CreateArgs) -> anyhow::Result<()> {
    let menu: RichMenu = read_json(&args.file)?;
    let id = ctx
        .client()?
        .create_rich_menu(menu)
        .await
        .map_err(|e| report(ctx.output, e))?;
    match ctx.output {
        OutputFormat::Json => ctx.print_json(&serde_json::json!({ "richMenuId": id })),
        OutputFormat::Text => {
            println!("  {} created {}", "✓".green().bold(), id.bold());
            Ok(())
        }
    }
}

async fn list(ctx: &Context) -> anyhow::Result<()> {
    let menus = ctx.client()?.list_rich_menus().await?;
    if ctx.output == OutputFormat::Json {
        return ctx.print_json(&menus);
    }

    if menus.is_empty() {
        println!("  (no rich menus, use `linebot rich-menu create`)");
        return Ok(());
    }
    println!(
        "\n  {:<44} {:<24} {:<11} {:<8}",
        "ID".bold(),
        "NAME".bold(),
        "SIZE".bold(),
        "AREAS".bold()
    );
    println!("  {}", "─".repeat(90).dimmed());
    for menu in &menus {
        let size = format!("{}x{}", menu.menu.size.width, menu.menu.size.height);
        println!(
            "  {:<44} {:<24} {:<11} {:<8}",
            menu.rich_menu_id,
            menu.menu.name,
            size,
            menu.menu.areas.len()
        );
    }
    println!("\n  {} {} rich menu(s)", "→".dimmed(), menus.len());
    Ok(())
}
