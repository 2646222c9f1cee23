use anyhow::Result;
use async_trait::async_trait;

/// A text-in/text-out connection to an external generative model.
///
/// The gateway is a black box to the rest of the crate: one prompt goes in,
/// one raw response comes out, or the call fails. No retries, no streaming,
/// no conversation state.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Name of the gateway.
    fn name(&self) -> &str;

    /// Model name used by the gateway.
    fn model_name(&self) -> &str {
        "unknown"
    }

    /// Send a prompt to the model and return the raw response text.
    async fn send_prompt(&self, prompt: &str) -> Result<String>;
}

/// Offline gateway used when no API key is configured and in tests.
/// Echoes a canned, well-formed response so the extraction pipeline can be
/// exercised end to end.
pub struct EchoGateway;

#[async_trait]
impl ModelGateway for EchoGateway {
    fn name(&self) -> &str {
        "echo"
    }

    fn model_name(&self) -> &str {
        "echo"
    }

    async fn send_prompt(&self, prompt: &str) -> Result<String> {
        Ok(format!(
            "## Code\n```\n// offline mode: no model configured\n```\n\
             ## Analysis\nEcho of the submitted prompt:\n\n{}",
            prompt
        ))
    }
}
