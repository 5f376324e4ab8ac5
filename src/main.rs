use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use api_error_responder::{
    api::{create_router, AppState},
    Config, Mode,
};

#[derive(Parser)]
#[command(about = "HTTP API with centralized error responses")]
struct Cli {
    /// Address to listen on (overrides LISTEN_ADDR)
    #[arg(long)]
    listen_addr: Option<String>,

    /// Deployment mode (overrides APP_ENV)
    #[arg(long)]
    mode: Option<Mode>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env();
    if let Some(listen_addr) = cli.listen_addr {
        config.listen_addr = listen_addr;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
        config.mode_defaulted = false;
    }

    init_tracing(config.log_json);

    info!("Starting API error responder service");
    if config.mode_defaulted {
        warn!("APP_ENV is unset or unrecognized; defaulting to {}", config.mode);
    }

    config.validate()?;
    info!(mode = %config.mode, "Configuration loaded and validated");

    if config.jwt_secret.is_none() {
        warn!("JWT_SECRET is not set; authenticated routes will fail");
    }

    let state = AppState::new(config.jwt_secret.as_deref());
    let app = create_router(state, config.error_handling());

    // Start server
    info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }
}
