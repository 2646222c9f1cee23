use log::info;
use serde::Serialize;

use crate::error::Error;
use crate::extract::{ExtractionResult, ResponseExtractor};
use crate::gateway::ModelGateway;
use crate::prompt::PromptBuilder;
use crate::request::{GenerationRequest, ProjectRequestBody, SolanaRequestBody};

/// Uniform result returned at the system boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultEnvelope {
    Success {
        #[serde(flatten)]
        result: ExtractionResult,
    },
    Error {
        message: String,
    },
}

impl ResultEnvelope {
    pub fn success(result: ExtractionResult) -> Self {
        Self::Success { result }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Error {
            message: if message.is_empty() {
                "Failed to generate code".to_string()
            } else {
                message
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Error> for ResultEnvelope {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidRequest(message) | Error::Gateway(message) => Self::error(message),
        }
    }
}

/// Orchestrates one generation request: validate, build the prompt, send it
/// through the gateway, extract, and wrap the outcome in a `ResultEnvelope`.
///
/// Exactly one gateway attempt per request; every failure is terminal for
/// that request. Stateless across requests, so concurrent requests need no
/// coordination.
pub struct RequestHandler {
    builder: PromptBuilder,
    extractor: ResponseExtractor,
    gateway: Box<dyn ModelGateway>,
}

impl RequestHandler {
    pub fn new(gateway: Box<dyn ModelGateway>) -> Self {
        Self {
            builder: PromptBuilder::new(),
            extractor: ResponseExtractor::new(),
            gateway,
        }
    }

    /// Handle a project-generator body (`{ projectType, description }`).
    pub async fn handle_project(&self, body: ProjectRequestBody) -> ResultEnvelope {
        match body.into_request() {
            Ok(request) => self.handle(&request).await,
            Err(err) => err.into(),
        }
    }

    /// Handle a Solana-generator body (`{ type, prompt, sourceCode? }`).
    pub async fn handle_solana(&self, body: SolanaRequestBody) -> ResultEnvelope {
        match body.into_request() {
            Ok(request) => self.handle(&request).await,
            Err(err) => err.into(),
        }
    }

    /// Handle an already-validated request.
    pub async fn handle(&self, request: &GenerationRequest) -> ResultEnvelope {
        let prompt = match self.builder.build(request) {
            Ok(prompt) => prompt,
            Err(err) => return err.into(),
        };

        info!(
            "Sending '{}' request to {} ({})",
            request.kind,
            self.gateway.name(),
            self.gateway.model_name()
        );

        match self.gateway.send_prompt(&prompt).await {
            Ok(raw) => {
                info!("Received {} bytes from {}", raw.len(), self.gateway.name());
                ResultEnvelope::success(self.extractor.extract(request.kind, &raw))
            }
            Err(err) => ResultEnvelope::from(Error::Gateway(format!("{err:#}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::RequestKind;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CannedGateway {
        response: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ModelGateway for CannedGateway {
        fn name(&self) -> &str {
            "canned"
        }

        async fn send_prompt(&self, _prompt: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct FailingGateway {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ModelGateway for FailingGateway {
        fn name(&self) -> &str {
            "failing"
        }

        async fn send_prompt(&self, _prompt: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("connection reset by peer"))
        }
    }

    fn canned(response: &str) -> (RequestHandler, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = RequestHandler::new(Box::new(CannedGateway {
            response: response.to_string(),
            calls: calls.clone(),
        }));
        (handler, calls)
    }

    #[tokio::test]
    async fn success_envelope_carries_extracted_fields() {
        let (handler, _) =
            canned("## Code\n```rust\nfn main() {}\n```\n## Analysis\nsolid\n## Dependencies\nanchor-lang 0.29");
        let request = GenerationRequest::new(RequestKind::Program, "a counter program");
        let envelope = handler.handle(&request).await;
        match envelope {
            ResultEnvelope::Success { result } => {
                assert_eq!(result.code.as_deref(), Some("fn main() {}"));
                assert_eq!(result.analysis.as_deref(), Some("solid"));
                assert_eq!(result.dependencies, vec!["anchor-lang 0.29".to_string()]);
            }
            ResultEnvelope::Error { message } => panic!("unexpected error: {message}"),
        }
    }

    #[tokio::test]
    async fn gateway_failure_yields_error_with_message_and_no_fields() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = RequestHandler::new(Box::new(FailingGateway { calls: calls.clone() }));
        let request = GenerationRequest::new(RequestKind::WebApp, "a landing page");
        let envelope = handler.handle(&request).await;
        match &envelope {
            ResultEnvelope::Error { message } => assert!(!message.is_empty()),
            ResultEnvelope::Success { .. } => panic!("expected an error envelope"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("code").is_none());
        assert!(json.get("analysis").is_none());
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_the_gateway() {
        let (handler, calls) = canned("unused");
        let request = GenerationRequest::new(RequestKind::Audit, "no source attached");
        let envelope = handler.handle(&request).await;
        assert!(!envelope.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn project_body_is_validated_before_the_gateway() {
        let (handler, calls) = canned("unused");
        let body: ProjectRequestBody =
            serde_json::from_str(r#"{"projectType": "dashboard", "description": ""}"#).unwrap();
        let envelope = handler.handle_project(body).await;
        assert!(!envelope.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn terminal_kind_returns_raw_response_as_analysis() {
        let raw = "gm! An SPL token is...\n## Code\nnot parsed";
        let (handler, _) = canned(raw);
        let body: SolanaRequestBody =
            serde_json::from_str(r#"{"type": "terminal", "prompt": "what is an SPL token?"}"#)
                .unwrap();
        let envelope = handler.handle_solana(body).await;
        match envelope {
            ResultEnvelope::Success { result } => {
                assert_eq!(result.analysis.as_deref(), Some(raw));
                assert!(result.code.is_none());
            }
            ResultEnvelope::Error { message } => panic!("unexpected error: {message}"),
        }
    }

    #[tokio::test]
    async fn success_envelope_serializes_with_status_tag() {
        let (handler, _) = canned("```js\nconsole.log(1)\n```");
        let request = GenerationRequest::new(RequestKind::Api, "log something");
        let envelope = handler.handle(&request).await;
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["code"], "console.log(1)");
    }
}
