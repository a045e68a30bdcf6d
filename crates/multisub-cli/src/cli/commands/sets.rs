//! `multisub sets` - Manage stored subscription sets.

use anyhow::Result;
use colored::Colorize;
use multisub::SubscriptionSet;
use tracing::warn;

use super::Context;
use crate::cli::args::{SetsArgs, SetsCommands};

pub async fn execute(ctx: Context, args: SetsArgs) -> Result<()> {
    match args.command {
        SetsCommands::List => list_sets(&ctx),
        SetsCommands::Add { id, title, urls } => add_set(&ctx, id, title, &urls),
        SetsCommands::Remove { id } => remove_set(&ctx, &id),
    }
}

fn list_sets(ctx: &Context) -> Result<()> {
    let sets = &ctx.config.sets;
    if ctx.output_format.print_structured(sets)? {
        return Ok(());
    }

    if sets.is_empty() {
        println!("{}", "No subscription sets.".dimmed());
        println!("Create one with: multisub sets add <ID> --title <TITLE> --url <URL>");
        return Ok(());
    }

    let base = ctx.config.public_base_url();
    let host = ctx.config.local_link_host();
    for set in sets {
        println!("{} {}", set.id.cyan().bold(), set.title);
        println!("  {} {}", "link:".bold(), base.link_for("http", &host, &set.id));
        for url in &set.urls {
            println!("  - {url}");
        }
    }
    if base.configured().is_none() {
        eprintln!("{} {}", "Note:".yellow().bold(), super::LOCAL_LINK_HINT);
    }

    Ok(())
}

fn add_set(ctx: &Context, id: String, title: Option<String>, urls: &[String]) -> Result<()> {
    let id = id.trim().to_string();
    if id.is_empty() {
        anyhow::bail!("Set id must not be empty");
    }

    let mut config = ctx.config.clone();
    let existing_title = config.find_set(&id).map(|set| set.title.clone());

    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .or(existing_title)
        .ok_or_else(|| anyhow::anyhow!("Title is required (--title)"))?;

    let mut set = SubscriptionSet::new(id, title);
    for rejected in set.replace_urls(urls) {
        warn!(error = %rejected, "Skipping invalid URL");
        eprintln!("{} {rejected}", "Skipped:".yellow().bold());
    }

    let sources = set.urls.len();
    let name = set.id.clone();
    let replaced = config.upsert_set(set);
    ctx.save(&config)?;

    println!(
        "{} {} set {} with {} source(s).",
        "Success:".green().bold(),
        if replaced { "Updated" } else { "Created" },
        name.cyan(),
        sources
    );

    Ok(())
}

fn remove_set(ctx: &Context, id: &str) -> Result<()> {
    ctx.require_set(id)?;

    let mut config = ctx.config.clone();
    config.remove_set(id);
    ctx.save(&config)?;

    println!("{} Removed set {}.", "Success:".green().bold(), id.cyan());
    Ok(())
}
