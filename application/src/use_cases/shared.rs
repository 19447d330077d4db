//! Shared helpers for the LLM-backed use cases.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use sage_domain::Model;
use std::time::Duration;
use tracing::debug;

/// Open a structured session and send one prompt, bounded by `timeout`.
pub(crate) async fn send_structured(
    gateway: &dyn LlmGateway,
    model: &Model,
    system_prompt: &str,
    prompt: &str,
    timeout: Option<Duration>,
) -> Result<String, GatewayError> {
    let exchange = exchange(gateway, model, system_prompt, prompt);

    match timeout {
        Some(limit) => tokio::time::timeout(limit, exchange)
            .await
            .map_err(|_| GatewayError::Timeout)?,
        None => exchange.await,
    }
}

async fn exchange(
    gateway: &dyn LlmGateway,
    model: &Model,
    system_prompt: &str,
    prompt: &str,
) -> Result<String, GatewayError> {
    let session = gateway.create_structured_session(model, system_prompt).await?;
    debug!("Sending {} chars to {}", prompt.len(), session.model());
    session.send(prompt).await
}
