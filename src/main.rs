use anyhow::Result;
use clap::Parser;
use marketing_functions::config::{EnvSecrets, ProviderSettings};
use marketing_functions::functions::{self, AppState};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "marketing-functions")]
#[command(about = "Serve the dashboard's AI proxy functions")]
struct CliArgs {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 54321)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketing_functions=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let settings = ProviderSettings::from_env();
    info!(
        "Starting marketing-functions (text model: {})",
        settings.gemini_model
    );

    let state = AppState::new(settings, Arc::new(EnvSecrets));
    let addr = SocketAddr::new(args.host, args.port);

    if let Err(e) = functions::serve(addr, state).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
