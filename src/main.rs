use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use sc2ranks::cmd::Cmd;
use sc2ranks::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ClientConfig::from_env()?;
    Cmd::parse().run(config).await
}
