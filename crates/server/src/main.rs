use anyhow::Result;
use tokio::net::TcpListener;
use wingman_core::config::{AppConfig, LoadOptions};
use wingman_server::{bootstrap_with_config, router};

fn init_logging(config: &AppConfig) {
    use tracing::Level;
    use wingman_core::config::LogFormat::*;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

async fn run() -> Result<()> {
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap_with_config(config).await?;
    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "server.started",
        address = %address,
        oracle_provider = app.config.llm.provider.as_str(),
        "wingman-server listening"
    );

    axum::serve(listener, router(app.state)).with_graceful_shutdown(wait_for_shutdown()).await?;

    tracing::info!(event_name = "server.stopping", "wingman-server stopping");
    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(
            event_name = "server.shutdown.signal_failed",
            error = %error,
            "could not install ctrl-c handler"
        );
    }
}
