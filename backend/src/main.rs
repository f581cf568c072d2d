use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use restock_backend::{app, config::Config, state::AppState, utils::email::mailer_from_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restock_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        smtp = ?config.smtp,
        smtp_skip_send = config.smtp_skip_send,
        cors_allow_origins = ?config.cors_allow_origins,
        "Loaded configuration from environment/.env"
    );
    if config.smtp.is_none() {
        tracing::warn!("SMTP_HOST is not set; verification codes will only be logged");
    }

    let mailer = mailer_from_config(&config)?;
    let addr = config.bind_addr;
    let app = app(AppState::new(config, mailer));

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
