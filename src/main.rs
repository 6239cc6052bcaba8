use std::sync::Arc;

use ai_devtools_mcp::{
    completion::OpenAiProvider,
    config::Config,
    logging,
    stdio::{serve, StdioTransport},
    AppState,
};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let provider = Arc::new(OpenAiProvider::new(config.provider.clone()));
    let state = AppState::new(config.server_name.clone(), provider);

    info!(
        server_name = %config.server_name,
        model = %config.provider.model,
        base_url = %config.provider.base_url,
        "server starting on stdio"
    );

    let mut transport = StdioTransport::new(tokio::io::stdin(), tokio::io::stdout());
    serve(&state, &mut transport, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for interrupt signal");
        std::future::pending::<()>().await;
    }
}
