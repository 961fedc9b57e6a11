use clap::Parser;
use election_registry::{RegistryConfig, RegistryServer};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "election-registry")]
#[command(about = "Serve the election contract over HTTP")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "ELECTION_REGISTRY_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind, 0 picks a free one
    #[arg(long, env = "ELECTION_REGISTRY_PORT", default_value_t = 0)]
    port: u16,

    /// Keep the ledger in this directory instead of in memory
    #[arg(long, env = "ELECTION_REGISTRY_DATA_DIR", conflicts_with = "temp")]
    data_dir: Option<PathBuf>,

    /// Keep the ledger in a temporary directory removed on exit
    #[arg(long)]
    temp: bool,
}

impl Cli {
    fn into_config(self) -> RegistryConfig {
        let config = match (self.data_dir, self.temp) {
            (Some(path), _) => RegistryConfig::directory(path),
            (None, true) => RegistryConfig::temp_dir(),
            (None, false) => RegistryConfig::memory(),
        };
        config.with_host(self.host).with_port(self.port)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Cli::parse().into_config();
    info!("Starting election registry with {:?} storage", config.storage);

    let server = RegistryServer::new(config).await?;
    info!("Serving at {}", server.url());

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    Ok(())
}
