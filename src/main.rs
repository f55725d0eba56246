use std::sync::Arc;

use moviematch::{
    config::Config,
    routes::{create_router, AppState},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moviematch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::from_config(config));

    tracing::info!(
        provider = state.provider.name(),
        model = %state.config.deepseek_model,
        api_url = %state.config.deepseek_api_url,
        "Language model configured"
    );
    if state.config.deepseek_api_key.is_none() {
        tracing::warn!("DEEPSEEK_API_KEY is not set; recommendation requests will fail");
    }

    let addr = state.config.bind_addr();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
