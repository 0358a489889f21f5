//! statusboard - terminal status dashboard for a static uptime feed.
//!
//! Supports two modes:
//! - Interactive (default): one response time chart per site, refreshed by a
//!   full reload every 10 minutes
//! - One-shot (`--once`): fetch every site once and print a summary
//!
//! Usage:
//!   statusboard                          # bundled site list, default feed
//!   statusboard --sites ./sites.json     # custom site list
//!   statusboard --base-url http://localhost:8000/data
//!   statusboard --once                   # print summary and exit
//!   statusboard --log-file /tmp/sb.log   # write logs while the TUI runs

use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tracing::info;

use statusboard::feed::{DEFAULT_BASE_URL, FeedSource, HttpFeed};
use statusboard::poll::{FetchOutcome, Poller, collect_outcomes};
use statusboard::registry::{RegistrySource, SiteRegistry};
use statusboard::report::summarize;
use statusboard::tui::{App, AppConfig};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Extra time the one-shot mode waits beyond the request timeout.
const ONCE_GRACE: Duration = Duration::from_secs(5);

/// Terminal status dashboard.
#[derive(Parser)]
#[command(name = "statusboard", about = "Uptime and latency dashboard", version)]
struct Args {
    /// Origin serving `<site id>.json` check histories.
    #[arg(long, env = "STATUSBOARD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// JSON file with the site list. Default: the bundled list.
    #[arg(long, env = "STATUSBOARD_SITES", value_name = "PATH")]
    sites: Option<PathBuf>,

    /// Seconds after start before all data is discarded and re-fetched (1..=86400).
    #[arg(
        long,
        env = "STATUSBOARD_RELOAD_AFTER",
        default_value = "600",
        value_parser = clap::value_parser!(u64).range(1..=86_400)
    )]
    reload_after: u64,

    /// Per-request timeout in seconds (1..=3600).
    #[arg(
        long,
        env = "STATUSBOARD_TIMEOUT",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..=3_600)
    )]
    timeout: u64,

    /// UI tick interval in milliseconds (10..=10000).
    #[arg(
        long,
        default_value = "250",
        value_parser = clap::value_parser!(u64).range(10..=10_000)
    )]
    tick: u64,

    /// Dashboard title.
    #[arg(long, env = "STATUSBOARD_TITLE", default_value = "Tensamin Status")]
    title: String,

    /// Write logs to this file (interactive mode logs nowhere otherwise).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Fetch every site once, print a summary and exit.
    #[arg(long)]
    once: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let registry_source = match args.sites {
        Some(ref path) => RegistrySource::File(path.clone()),
        None => RegistrySource::Bundled,
    };
    let registry = match registry_source.load() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let timeout = Duration::from_secs(args.timeout);
    let feed: Arc<dyn FeedSource> = match HttpFeed::new(&args.base_url, timeout) {
        Ok(f) => Arc::new(f),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        sites = registry.len(),
        base_url = %args.base_url,
        "starting"
    );

    if args.once {
        run_once(&registry, feed, timeout.saturating_add(ONCE_GRACE));
        return;
    }

    let app = App::new(AppConfig {
        title: args.title,
        registry,
        registry_source,
        feed,
        reload_after: Duration::from_secs(args.reload_after),
        tick_rate: Duration::from_millis(args.tick),
    });

    if let Err(e) = app.run() {
        eprintln!("Error running TUI: {}", e);
        process::exit(1);
    }
}

fn run_once(registry: &SiteRegistry, feed: Arc<dyn FeedSource>, deadline: Duration) {
    let (tx, rx) = mpsc::channel::<FetchOutcome>();
    let expected = Poller::start(registry, feed, 1, tx);
    let outcomes = collect_outcomes(&rx, expected, deadline);
    for line in summarize(registry, outcomes) {
        println!("{}", line);
    }
}

/// Interactive mode owns the terminal, so logs go to a file or nowhere.
/// One-shot mode logs to stderr.
fn init_logging(args: &Args) -> std::io::Result<()> {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("statusboard=info"))
    };

    if let Some(ref path) = args.log_file {
        let file = File::options().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.once {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
