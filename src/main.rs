//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::collections::BTreeSet;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chatlens::cli::Args;
use chatlens::core::apply_filters;
use chatlens::format::{OutputFormat, write_to_format};
use chatlens::parser::{ChatParser, ParseStats};
use chatlens::{ChatlensError, Message};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so they never mix with the summary on stdout.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "chatlens=debug"
    } else {
        "chatlens=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();

    let parser = ChatParser::with_config(args.parser_config()?);
    let filter_config = args.filter_config()?;
    let output_config = args.output_config();
    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();

    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {output_path}");
    println!("📄 Format:  {format}");
    if let Some(ref after) = args.after {
        println!("📅 After:   {after}");
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {before}");
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {from}");
    }
    println!();

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let report = parser.parse_with_stats(Path::new(&args.input))?;
    println!(
        "   Found {} messages ({:.2}s)",
        report.messages.len(),
        parse_start.elapsed().as_secs_f64()
    );

    let messages = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filtered = apply_filters(report.messages, &filter_config);
        println!("   {} messages after filtering", filtered.len());
        filtered
    } else {
        report.messages
    };

    println!("💾 Writing {format}...");
    write_to_format(&messages, &output_path, format, &output_config)?;

    println!();
    if messages.is_empty() {
        println!("⚠️  No parseable messages found");
    } else {
        println!("✅ Done! Output saved to {output_path}");
    }

    print_summary(&report.stats, &messages);

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn print_summary(stats: &ParseStats, messages: &[Message]) {
    println!();
    println!("📊 Summary:");
    println!("   Lines:          {}", stats.lines);
    println!("   Headers:        {}", stats.headers);
    println!("   Continuations:  {}", stats.continuations);
    if stats.orphan_lines > 0 {
        println!("   Orphan lines:   {}", stats.orphan_lines);
    }
    println!("   System notices: {}", stats.system_notices);
    let dropped = stats.empty_dropped + stats.undated_dropped;
    if dropped > 0 {
        println!("   Incomplete:     {dropped}");
    }
    if stats.used_fallbacks() {
        println!(
            "   Fallbacks:      {} dates, {} times",
            stats.date_fallbacks, stats.time_fallbacks
        );
    }
    println!("   Emitted:        {}", stats.emitted);
    println!("   Written:        {}", messages.len());

    let authors: BTreeSet<&str> = messages.iter().map(Message::author).collect();
    if !authors.is_empty() {
        let names: Vec<&str> = authors.into_iter().collect();
        println!("   Authors ({}):   {}", names.len(), names.join(", "));
    }

    // Input is sorted; filtering preserves order.
    if let (Some(first), Some(last)) = (messages.first(), messages.last()) {
        println!("   First:          {}", first.timestamp.format("%Y-%m-%d %H:%M"));
        println!("   Last:           {}", last.timestamp.format("%Y-%m-%d %H:%M"));
    }
}
