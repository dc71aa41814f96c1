use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use fern::colors::{Color, ColoredLevelConfig};
use log::{error, info, LevelFilter};
use url::Url;

use rss2html::{client::FeedClient, error::Result, render, tree};

/// Convert an RSS 2.0 feed into a static HTML news table.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// URL of the RSS 2.0 feed
    url: Url,
    /// Output file, including the .html extension
    output: PathBuf,
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbosity: u8) -> std::result::Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
        .debug(Color::BrightBlack);

    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let client = FeedClient::new();
    let feed = client.fetch_feed(&cli.url).await?;

    let root = tree::parse(&feed)?;
    let channel = tree::channel(&root)?;

    let lines = render::render(channel)?;

    let file = File::create(&cli.output)
        .with_context(|| format!("unable to create {}", cli.output.display()))?;
    let mut out = BufWriter::new(file);
    for line in &lines {
        writeln!(out, "{}", line).context("failed to write output")?;
    }
    out.flush().context("failed to flush output")?;

    info!("Wrote {} lines to {}", lines.len(), cli.output.display());
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", err);
        std::process::exit(1);
    }

    if let Err(err) = run(cli).await {
        error!("{}", err);
        std::process::exit(1);
    }
}
