use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use hospital_assistant::config::AppConfig;
use hospital_assistant::routes;
use hospital_assistant::services::submission::webhook::WebhookSubmitter;
use hospital_assistant::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    config.validate()?;

    tracing::info!(
        hospital = %config.clinic.name,
        typing_min_ms = config.typing_delay_min_ms,
        typing_max_ms = config.typing_delay_max_ms,
        "booking webhook configured"
    );
    let submitter = WebhookSubmitter::new(
        config.webhook_url.clone(),
        config.webhook_timeout_secs.map(Duration::from_secs),
    )?;

    let state = Arc::new(AppState::new(config.clone(), Box::new(submitter)));
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
