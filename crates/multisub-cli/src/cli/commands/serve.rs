//! `multisub serve` - Serve merged feeds over HTTP.

use anyhow::{Context as _, Result};
use colored::Colorize;
use tokio::net::TcpListener;

use super::Context;
use crate::cli::args::ServeArgs;
use crate::server::{self, AppState};

pub async fn execute(ctx: Context, args: ServeArgs) -> Result<()> {
    let listen = args.listen.unwrap_or(ctx.config.listen);
    let state = AppState::from_config(&ctx.config)?;

    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to listen on {listen}"))?;

    eprintln!(
        "{} {} ({} sets)",
        "Listening on".bold(),
        format!("http://{}", listener.local_addr()?).cyan(),
        ctx.config.sets.len()
    );

    server::serve(listener, state).await?;
    Ok(())
}
