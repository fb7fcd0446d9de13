//! `marquee` binary entrypoint.
//!
//! Parses command-line arguments, seeds the demo catalog, and starts the
//! HTTP server.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

use std::net::IpAddr;
use std::net::Ipv4Addr;

use anyhow::Result;
use clap::Parser;

use marquee_api::config::{Config, DEFAULT_PORT};
use marquee_api::seed::{self, SeedProfile};
use marquee_api::server::Server;
use marquee_core::observability::{init_logging, LogFormat};
use marquee_store::BookingStore;

/// Concurrent cinema seat-booking service.
#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
struct Cli {
    /// Address to bind to. No name resolution is performed, so 127.0.0.1
    /// is valid but localhost is not.
    #[arg(long, env = "MARQUEE_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    address: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "MARQUEE_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Number of worker threads serving requests.
    #[arg(long, env = "MARQUEE_THREADS", default_value_t = 8)]
    threads: usize,

    /// Start with an empty catalog instead of seeding demo data.
    #[arg(long)]
    no_seed: bool,

    /// Emit JSON logs instead of pretty-printed ones.
    #[arg(long, env = "MARQUEE_JSON_LOGS")]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cli.threads.max(1))
        .enable_all()
        .build()?;

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let store = BookingStore::shared();

    if cli.no_seed {
        tracing::info!("Starting with an empty catalog");
    } else {
        tracing::info!("Seeding demo catalog, please wait");
        seed::seed(&store, &SeedProfile::default())?;
    }

    let config = Config {
        address: cli.address,
        port: cli.port,
    };
    let server = Server::builder().config(config).store(store).build();
    server.serve().await?;

    Ok(())
}
