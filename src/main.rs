//! tubelink - find music links on the video platform
//!
//! Takes track, album or artist links from other music services (as
//! arguments, or one per line on stdin) and prints the matching channel,
//! album playlist, thumbnail and track URLs as each link completes.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tubelink::browser::rendering_browser;
use tubelink::utils::init_logging;
use tubelink::{
    spawn_resolver, ExtractorRegistry, ResolveCommand, ResolveEvent, Resolver, ResolverSettings,
};

#[derive(Parser)]
#[command(name = "tubelink", version, about)]
struct Args {
    /// Links (or text containing links); read from stdin when omitted
    links: Vec<String>,

    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the scroll budget per listing
    #[arg(long)]
    max_scrolls: Option<usize>,

    /// Maximum links resolved at once
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Show the browser window (chromium builds only)
    #[arg(long)]
    show_browser: bool,

    /// Print one JSON event per line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => ResolverSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => ResolverSettings::load_or_default()?,
    };
    if let Some(max_scrolls) = args.max_scrolls {
        settings.collect.max_scrolls = max_scrolls;
    }
    if let Some(max_concurrent) = args.max_concurrent {
        settings.max_concurrent = max_concurrent;
    }
    if args.show_browser {
        settings.headless = false;
    }
    let settings = settings.validated();

    // Initialize logging
    init_logging(&settings.log_filter);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(args, settings))
}

async fn run(args: Args, settings: ResolverSettings) -> Result<()> {
    let browser = rendering_browser(settings.headless)?;
    let extractors = Arc::new(ExtractorRegistry::standard(&settings)?);
    let resolver = Arc::new(Resolver::new(browser, extractors, settings));

    let (commands, mut events, actor) = spawn_resolver(resolver, 64);

    let inputs = if args.links.is_empty() {
        read_stdin_lines().await?
    } else {
        args.links
    };
    if inputs.is_empty() {
        eprintln!("No links given");
        return Ok(());
    }

    for text in inputs {
        commands.send(ResolveCommand::Resolve { text }).await?;
    }
    commands.send(ResolveCommand::Shutdown).await?;
    drop(commands);

    let mut failures = 0usize;
    while let Some(event) = events.recv().await {
        if matches!(event, ResolveEvent::Failed { .. }) {
            failures += 1;
        }
        if args.json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            print_event(&event);
        }
    }
    actor.await?;

    if failures > 0 {
        eprintln!("{failures} link(s) failed");
    }
    Ok(())
}

async fn read_stdin_lines() -> Result<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut inputs = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            inputs.push(line);
        }
    }
    Ok(inputs)
}

fn print_event(event: &ResolveEvent) {
    match event {
        ResolveEvent::Rejected { input, reason, .. } => println!("✗ {input}: {reason}"),
        ResolveEvent::Started { url, .. } => println!("… {url}"),
        ResolveEvent::Resolved { url, link, .. } => {
            match link.best_url() {
                Some(best) => println!("✓ {url} -> {best}"),
                None => println!("✓ {url}: no match on the destination"),
            }
            for (label, value) in [
                ("artist", &link.artist_url),
                ("album", &link.album_url),
                ("thumbnail", &link.thumbnail_url),
                ("track", &link.track_url),
            ] {
                if let Some(value) = value {
                    println!("    {label:<9} {value}");
                }
            }
        }
        ResolveEvent::NotFound { url, .. } => println!("? {url}: nothing to search for"),
        ResolveEvent::Failed { url, error, .. } => println!("✗ {url}: {error}"),
    }
}
