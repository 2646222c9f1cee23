use crate::error::{Error, Result};
use crate::kind::RequestKind;
use crate::request::GenerationRequest;

/// Shared response-format contract for the section-structured Solana kinds.
/// The extractor's Mode B rules are written against exactly this shape.
const SECTION_FORMAT: &str = r#"Please provide your response in the following format:

## Code
```
[Your complete code here]
```

## Analysis
[Detailed analysis including security considerations, performance
optimizations, best practices implemented, and potential improvements]

## Dependencies
[Required dependencies and their versions]"#;

/// Builds the prompt string sent to the model for one request.
///
/// Selects a per-kind template and interpolates the user's free text into
/// it. Pure: no side effects, no model interaction.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the prompt for `request`.
    ///
    /// Fails with `InvalidRequest` when the required input for the kind is
    /// empty: `audit` needs source code (the prompt text is ignored), every
    /// other kind needs a non-empty description/prompt (source code is
    /// ignored).
    pub fn build(&self, request: &GenerationRequest) -> Result<String> {
        if request.kind.requires_source_code() {
            let source = request
                .source_code
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if source.is_empty() {
                return Err(Error::InvalidRequest(
                    "Source code is required for an audit".to_string(),
                ));
            }
            return Ok(Self::audit_template(source));
        }

        let text = request.description.trim();
        if text.is_empty() {
            return Err(Error::InvalidRequest(format!(
                "A prompt is required for '{}'",
                request.kind
            )));
        }

        Ok(match request.kind {
            RequestKind::WebApp => format!(
                "You are an expert React developer. Generate a modern, production-ready \
                 Next.js component based on this description: \"{text}\"\n\n\
                 Use TypeScript with strict type checking, Tailwind CSS for styling, and \
                 modern React patterns (hooks, composition). Include proper error handling, \
                 loading states, and accessibility.\n\n\
                 Please provide the complete component code wrapped in a TypeScript/React \
                 code block."
            ),
            RequestKind::MobileApp => format!(
                "You are an expert React Native developer. Generate a production-ready \
                 React Native component based on this description: \"{text}\"\n\n\
                 Use TypeScript with strict type checking and React Native's built-in \
                 styling. The layout must work on both iOS and Android, with proper \
                 loading and error states.\n\n\
                 Please provide the complete component code wrapped in a TypeScript/React \
                 Native code block."
            ),
            RequestKind::Dashboard => format!(
                "You are an expert frontend developer. Generate a modern dashboard \
                 component based on this description: \"{text}\"\n\n\
                 Use TypeScript, Tailwind CSS, and a charting library (Chart.js or \
                 Recharts) for data visualization. Create a responsive grid layout with \
                 loading skeletons and proper color coding.\n\n\
                 Please provide the complete component code wrapped in a TypeScript/React \
                 code block."
            ),
            RequestKind::Api => format!(
                "You are an expert backend developer. Generate a production-ready API \
                 endpoint based on this description: \"{text}\"\n\n\
                 Use TypeScript with strict type checking, proper request validation, \
                 error handling middleware, and RESTful conventions. Cover authentication, \
                 input sanitization, rate limiting, and CORS.\n\n\
                 Please provide the complete API endpoint code wrapped in a \
                 TypeScript/Node.js code block."
            ),
            RequestKind::Program => format!(
                "You are an expert Solana blockchain developer. Generate a \
                 production-ready Solana program using Anchor based on this description: \
                 \"{text}\"\n\n{SECTION_FORMAT}\n\n\
                 The code should be production-ready and follow all Solana security best \
                 practices."
            ),
            RequestKind::Frontend => format!(
                "You are an expert React and Solana developer. Generate a modern dApp \
                 frontend based on this description: \"{text}\"\n\n{SECTION_FORMAT}\n\n\
                 Use Next.js with TypeScript, @solana/web3.js and \
                 @solana/wallet-adapter, with proper wallet connection handling, \
                 transaction signing, and loading states."
            ),
            RequestKind::Template => format!(
                "You are an expert Solana developer. Generate a complete Solana project \
                 template based on this description: \"{text}\"\n\n{SECTION_FORMAT}\n\n\
                 Use the Anchor framework, include a testing setup and CI/CD \
                 configuration, and follow Solana project structure best practices."
            ),
            RequestKind::Terminal => format!(
                "You are Codesmith, an AI assistant specializing in Solana blockchain \
                 development, with deep knowledge of Solana, the Anchor framework, SPL \
                 tokens, and blockchain development in general.\n\n\
                 Always identify yourself as Codesmith and never mention the underlying \
                 model. Be helpful and concise, use code examples when relevant, and stay \
                 focused on blockchain and development topics.\n\n\
                 User question: \"{text}\"\n\n\
                 Please provide a helpful response that demonstrates your expertise."
            ),
            RequestKind::Audit => unreachable!("handled by requires_source_code above"),
        })
    }

    fn audit_template(source: &str) -> String {
        format!(
            "You are an expert Solana smart contract auditor. Analyze the following \
             Solana program code and provide a comprehensive analysis:\n\n{source}\n\n\
             Please analyze for:\n\
             1. Security vulnerabilities\n\
             2. Best practice violations\n\
             3. Performance optimizations\n\
             4. Code quality issues\n\
             5. Potential logical errors\n\
             6. Compliance with Solana program standards\n\n\
             Provide specific recommendations for improvements."
        )
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_non_audit_kind_interpolates_the_prompt() {
        let builder = PromptBuilder::new();
        for kind in [
            RequestKind::WebApp,
            RequestKind::MobileApp,
            RequestKind::Dashboard,
            RequestKind::Api,
            RequestKind::Program,
            RequestKind::Frontend,
            RequestKind::Template,
            RequestKind::Terminal,
        ] {
            let request = GenerationRequest::new(kind, "build a voting widget");
            let prompt = builder.build(&request).unwrap();
            assert!(prompt.contains("build a voting widget"), "kind {}", kind);
        }
    }

    #[test]
    fn empty_prompt_is_rejected_before_any_model_call() {
        let builder = PromptBuilder::new();
        let request = GenerationRequest::new(RequestKind::Program, "   ");
        assert!(matches!(builder.build(&request), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn audit_embeds_source_code_and_ignores_the_prompt() {
        let builder = PromptBuilder::new();
        let request = GenerationRequest::new(RequestKind::Audit, "ignored text")
            .with_source_code("fn vulnerable() {}");
        let prompt = builder.build(&request).unwrap();
        assert!(prompt.contains("fn vulnerable() {}"));
        assert!(!prompt.contains("ignored text"));
    }

    #[test]
    fn audit_without_source_code_is_rejected() {
        let builder = PromptBuilder::new();
        let request = GenerationRequest::new(RequestKind::Audit, "please audit");
        assert!(matches!(builder.build(&request), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn section_kinds_request_the_markdown_contract() {
        let builder = PromptBuilder::new();
        for kind in [RequestKind::Program, RequestKind::Frontend, RequestKind::Template] {
            let request = GenerationRequest::new(kind, "an escrow");
            let prompt = builder.build(&request).unwrap();
            assert!(prompt.contains("## Code"), "kind {}", kind);
            assert!(prompt.contains("## Dependencies"), "kind {}", kind);
        }
    }
}
