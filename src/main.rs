use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tshirt_studio::ai::ReplicateImageClient;
use tshirt_studio::models::Config;
use tshirt_studio::server::{self, AppState};

#[derive(Debug, Parser)]
#[command(name = "tshirt-studio")]
#[command(about = "Serve the animal t-shirt studio")]
struct CliArgs {
    /// Address to listen on; overrides BIND_ADDR from the environment.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tshirt_studio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tshirt-studio");

    let args = CliArgs::parse();
    let config = Config::from_env()?;

    if config.replicate_api_token.is_none() {
        warn!("REPLICATE_API_TOKEN not set; generation requests will fail until it is provided");
    }

    let image_gen = ReplicateImageClient::new(config.replicate_api_token.clone());
    let state = Arc::new(AppState::new(Arc::new(image_gen)));
    let addr = args.bind.unwrap_or(config.bind_addr);

    match server::serve(addr, state).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Server failed: {}", e);
            std::process::exit(1);
        }
    }
}
