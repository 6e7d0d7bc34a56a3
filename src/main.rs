use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dropwatch_core::{
    config::{Config, SourceKind},
    IngestStats, Stores,
};
use dropwatch_feeds::FeedSource;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "dropwatch", about = "Live view of firewall drops in the system journal")]
struct Cli {
    /// Where to read log lines from (default: `source.kind` from the config).
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Log file to replay; implies `--source file`.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Ingest to EOF and print a report instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Number of drops per category printed in headless mode.
    #[arg(long, default_value_t = 20)]
    tail: usize,

    /// Write debug logs to /tmp/dropwatch-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Journal,
    Stdin,
    File,
}

impl Cli {
    fn feed_source(&self, config: &Config) -> anyhow::Result<FeedSource> {
        let kind = match (self.source, &self.file) {
            (Some(SourceArg::Journal), _) => SourceKind::Journal,
            (Some(SourceArg::Stdin), _) => SourceKind::Stdin,
            (Some(SourceArg::File), _) | (None, Some(_)) => SourceKind::File,
            (None, None) => config.source.kind,
        };
        Ok(match kind {
            SourceKind::Journal => FeedSource::Journal {
                command: config.source.command.clone(),
                args: config.source.args.clone(),
            },
            SourceKind::Stdin => FeedSource::Stdin,
            SourceKind::File => FeedSource::File(
                self.file.clone().context("--source file needs --file <PATH>")?,
            ),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/dropwatch-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("dropwatch debug log started: tail -f /tmp/dropwatch-debug.log");
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "config unreadable, using defaults");
        Config::defaults()
    });
    let source = cli.feed_source(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;

    if cli.headless {
        let mut stdout = std::io::stdout().lock();
        let result = runtime.block_on(dropwatch::headless::run(&source, cli.tail, &mut stdout));
        runtime.shutdown_timeout(Duration::from_millis(100));
        return result;
    }

    let stores = Stores::new(config.store.window_mode);
    let stats = Arc::new(IngestStats::new());
    let cancel = CancellationToken::new();

    // A feed that cannot be opened is fatal before the terminal is touched.
    let handle = {
        let _guard = runtime.enter();
        dropwatch_feeds::spawn(&source, stores.clone(), stats.clone(), cancel.clone())?
    };

    let ui = dropwatch_tui::run(stores, stats, source.to_string(), config);

    cancel.cancel();
    let ingest = runtime.block_on(handle);
    // A stdin reader may still be parked in a blocking read; do not wait on it.
    runtime.shutdown_timeout(Duration::from_millis(100));

    ui?;
    ingest?.context("log source failed")?;
    Ok(())
}
