use std::sync::Arc;

use tracing::info;

use crate::api::{self, AppState};
use crate::cli::commands::{GatewayArgs, ServeArgs};
use crate::config::{resolve_api_key, GatewayConfig};
use crate::errors::VantageError;
use crate::llm::anthropic::AnthropicProvider;

pub fn gateway_config(args: &GatewayArgs) -> Result<GatewayConfig, VantageError> {
    let api_key = resolve_api_key(args.api_key.as_deref())?;
    Ok(GatewayConfig::new(api_key)
        .with_model(args.model.as_deref())
        .with_max_tokens(args.max_tokens)
        .with_timeout_secs(args.timeout))
}

pub async fn handle_serve(args: ServeArgs) -> Result<(), VantageError> {
    let config = gateway_config(&args.gateway)?;
    let provider = AnthropicProvider::new(&config)?;

    info!(
        host = %args.host,
        port = args.port,
        model = %config.model,
        strict_schema = args.strict_schema,
        "Starting API server"
    );

    let state = AppState {
        provider: Arc::new(provider),
        strict_schema: args.strict_schema,
    };
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| VantageError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
