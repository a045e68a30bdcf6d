//! `multisub config` - Configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&ctx, &key, &value),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    if ctx.output_format.print_structured(config)? {
        return Ok(());
    }

    println!("{}", "Current Configuration:".bold());
    println!();

    let base = config
        .public_base_url()
        .configured()
        .map_or_else(|| "(request host)".dimmed().to_string(), String::from);
    println!("  {} {}", "public_base_url:".bold(), base);
    println!("  {} {}", "listen:".bold(), config.listen);
    println!("  {} {}s", "timeout_secs:".bold(), config.timeout_secs);
    println!("  {} {}", "concurrency:".bold(), config.concurrency);
    println!("  {} {}", "follow_redirects:".bold(), config.follow_redirects);
    println!("  {} {}", "output_format:".bold(), config.output_format.unwrap_or_default());
    println!("  {} {}", "sets:".bold(), config.sets.len());

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    apply(&mut config, key, value)?;
    ctx.save(&config)?;

    println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());
    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "public_base_url" | "base_url" => {
            let value = value.trim();
            config.public_base_url = (!value.is_empty()).then(|| value.to_string());
        }
        "listen" => config.listen = value.parse()?,
        "timeout_secs" | "timeout" => config.timeout_secs = value.parse()?,
        "concurrency" => config.concurrency = value.parse()?,
        "follow_redirects" => config.follow_redirects = value.parse()?,
        "output_format" | "output" => config.output_format = Some(value.parse()?),
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 public_base_url   - Base of links handed to subscribers\n  \
                 listen            - Address for `multisub serve`\n  \
                 timeout_secs      - Per-source fetch timeout\n  \
                 concurrency       - Sources fetched at once\n  \
                 follow_redirects  - Follow upstream redirects (true/false)\n  \
                 output_format     - Default output (pretty, json, yaml)",
                key
            );
        }
    }
    Ok(())
}
