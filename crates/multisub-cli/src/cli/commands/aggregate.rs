//! `multisub aggregate` - Fetch sources and print the merged feed.

use anyhow::Result;
use colored::Colorize;
use multisub::{AggregateReport, Aggregator, SourceOutcome};

use super::Context;
use crate::cli::args::AggregateArgs;

pub async fn execute(ctx: Context, args: AggregateArgs) -> Result<()> {
    let mut urls = Vec::new();
    if let Some(id) = &args.set {
        urls.extend(ctx.require_set(id)?.urls.iter().cloned());
    }
    urls.extend(args.urls);

    if urls.is_empty() {
        anyhow::bail!(
            "No source URLs given.\n\n\
             Pass URLs as arguments or use --set <ID>."
        );
    }

    let aggregator = Aggregator::with_config(ctx.config.fetch_config())?;
    let report = aggregator.aggregate_report(&urls).await;

    if ctx.output_format.print_structured(&report)? {
        return Ok(());
    }

    let text = if args.decode {
        report.merged.joined()
    } else {
        report.encode().into_string()
    };
    if !text.is_empty() {
        println!("{text}");
    }

    if ctx.verbose {
        print_summary(&report);
    }

    Ok(())
}

/// Per-source summary on stderr, so stdout stays a clean feed.
fn print_summary(report: &AggregateReport) {
    for source in &report.sources {
        let status = match &source.outcome {
            SourceOutcome::Fetched { entries, added } => {
                format!("{} {entries} entries, {added} new", "ok".green().bold())
            }
            SourceOutcome::Failed { error } => format!("{} {error}", "failed".red().bold()),
            SourceOutcome::Skipped { reason } => format!("{} {reason}", "skipped".yellow().bold()),
        };
        eprintln!("  {status}  {}", source.url.dimmed());
    }
    eprintln!(
        "{} {} unique entries from {}/{} sources",
        "Merged:".bold(),
        report.merged.len().to_string().cyan().bold(),
        report.fetched(),
        report.sources.len()
    );
}
