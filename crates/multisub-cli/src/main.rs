//! multisub - merged proxy subscription feeds
//!
//! Fetches many subscription sources and serves them as one feed.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    multisub_cli::run().await
}
