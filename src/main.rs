use clap::{Parser, Subcommand};
use deps_score::config::{self, ServerConfig};
use deps_score::graph::remote::RemoteGraphProvider;
use deps_score::score::registry::RegistryTable;
use deps_score::score::report::Scorer;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser)]
#[command(name = "deps-score")]
#[command(version, about = "Dependency freshness scoring service")]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = config::DEFAULT_BIND_ADDR)]
    addr: SocketAddr,

    /// Seconds a computed report stays fresh in the cache
    #[arg(long, default_value_t = config::DEFAULT_CACHE_AGING_SECS)]
    cache_aging: u64,

    /// Base URL of the module graph API
    #[arg(long, default_value = config::DEFAULT_GRAPH_API)]
    graph_api: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the freshness report for a root module and exit
    Score {
        /// Root module URL to score
        url: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = ServerConfig {
        addr: cli.addr,
        cache_aging_secs: cli.cache_aging,
        graph_api: cli.graph_api,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command {
        None => runtime.block_on(deps_score::server::run(config)),
        Some(Command::Score { url }) => runtime.block_on(print_score(&url, &config)),
    }
}

/// One-shot scoring without the server or the cache
async fn print_score(url: &str, config: &ServerConfig) -> anyhow::Result<()> {
    let root = Url::parse(url)?;
    let provider = Arc::new(RemoteGraphProvider::new(&config.graph_api));
    let scorer = Scorer::new(provider, Arc::new(RegistryTable::default()));

    let report = scorer.report(&root).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
