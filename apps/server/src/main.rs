//! Cross-exchange price deviation monitor.
//!
//! Polls public exchange tickers, normalizes quotes onto USD and the
//! local fiat currencies, and serves the deviation dashboard while
//! pushing threshold alerts.

mod config;
mod poller;
mod routes;
mod state;

use clap::Parser;
use config::AppConfig;
use poller::Poller;
use state::create_state;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Price deviation monitor CLI
#[derive(Parser, Debug)]
#[command(name = "quotewatch")]
#[command(about = "Cross-exchange price deviation monitor", long_about = None)]
struct Args {
    /// HTTP port for the dashboard
    #[arg(short = 'P', long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Seconds between polling cycles
    #[arg(long, default_value_t = 5)]
    poll_interval: u64,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Disable the reference exchange websocket push feed
    #[arg(long, default_value_t = false)]
    no_push_feed: bool,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_logging(&args.log_level);

    let config = AppConfig {
        port: args.port,
        poll_interval: Duration::from_secs(args.poll_interval),
        push_feed: !args.no_push_feed,
        ..AppConfig::default()
    };

    info!("quotewatch starting");
    info!("  Port: {}", config.port);
    info!("  Poll interval: {:?}", config.poll_interval);
    info!("  Push feed: {}", config.push_feed);

    let state = match create_state(config) {
        Ok(state) => state,
        Err(e) => {
            error!("failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    tokio::spawn(poller::run_rate_loop(state.clone()));

    if state.config.push_feed {
        let (tx, rx) = tokio::sync::mpsc::channel(256);
        tokio::spawn(quotewatch_feeds::stream::run_push_feed(tx));
        tokio::spawn(poller::run_push_writer(state.clone(), rx));
    }

    tokio::spawn(Poller::new(state.clone()).run());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = routes::create_router(state);

    info!("dashboard listening on http://{addr}");
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
