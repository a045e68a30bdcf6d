//! `multisub link` - Print the public subscription link of a set.

use anyhow::Result;
use colored::Colorize;
use multisub::PublicBaseUrl;

use super::Context;
use crate::cli::args::LinkArgs;

pub async fn execute(ctx: Context, args: LinkArgs) -> Result<()> {
    let set = ctx.require_set(&args.id)?;

    let base = match args.base_url.as_deref() {
        Some(url) => PublicBaseUrl::new(Some(url)),
        None => ctx.config.public_base_url(),
    };
    let link = base.link_for("http", &ctx.config.local_link_host(), &set.id);
    if base.configured().is_none() {
        eprintln!("{} {}", "Note:".yellow().bold(), super::LOCAL_LINK_HINT);
    }

    if !ctx.output_format.print_structured(&serde_json::json!({ "id": set.id, "link": link }))? {
        println!("{link}");
    }

    Ok(())
}
