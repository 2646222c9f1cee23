use serde::Deserialize;

use crate::error::{Error, Result};
use crate::kind::{Generator, RequestKind};

/// A validated generation request, ready for prompt building.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub kind: RequestKind,
    /// Free-text description (project generator) or prompt (Solana
    /// generator). Empty for `audit`, which only consumes `source_code`.
    pub description: String,
    /// Source code under review; only meaningful for `audit`.
    pub source_code: Option<String>,
}

impl GenerationRequest {
    pub fn new(kind: RequestKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            source_code: None,
        }
    }

    pub fn with_source_code(mut self, source_code: impl Into<String>) -> Self {
        self.source_code = Some(source_code.into());
        self
    }
}

/// Inbound body for the project generator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequestBody {
    pub project_type: RequestKind,
    pub description: String,
}

impl ProjectRequestBody {
    /// Validate the body shape and turn it into a `GenerationRequest`.
    pub fn into_request(self) -> Result<GenerationRequest> {
        if self.project_type.generator() != Generator::Project {
            return Err(Error::InvalidRequest(format!(
                "'{}' is not a project type",
                self.project_type
            )));
        }
        if self.description.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Project type and description are required".to_string(),
            ));
        }
        Ok(GenerationRequest::new(self.project_type, self.description))
    }
}

/// Inbound body for the Solana generator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolanaRequestBody {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(default)]
    pub prompt: String,
    pub source_code: Option<String>,
}

impl SolanaRequestBody {
    pub fn into_request(self) -> Result<GenerationRequest> {
        if self.kind.generator() != Generator::Solana {
            return Err(Error::InvalidRequest(format!(
                "'{}' is not a Solana development type",
                self.kind
            )));
        }
        if self.kind.requires_source_code() {
            match &self.source_code {
                Some(code) if !code.trim().is_empty() => {}
                _ => {
                    return Err(Error::InvalidRequest(
                        "Source code is required for an audit".to_string(),
                    ));
                }
            }
        } else if self.prompt.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Type and prompt are required".to_string(),
            ));
        }
        let mut request = GenerationRequest::new(self.kind, self.prompt);
        request.source_code = self.source_code;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_body_validates_description() {
        let body: ProjectRequestBody =
            serde_json::from_str(r#"{"projectType": "web-app", "description": ""}"#).unwrap();
        assert!(matches!(body.into_request(), Err(Error::InvalidRequest(_))));

        let body: ProjectRequestBody =
            serde_json::from_str(r#"{"projectType": "api", "description": "a todo API"}"#).unwrap();
        let request = body.into_request().unwrap();
        assert_eq!(request.kind, RequestKind::Api);
        assert_eq!(request.description, "a todo API");
    }

    #[test]
    fn project_body_rejects_solana_kinds() {
        let body: ProjectRequestBody =
            serde_json::from_str(r#"{"projectType": "program", "description": "x"}"#).unwrap();
        assert!(matches!(body.into_request(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn unknown_kind_fails_deserialization() {
        let parsed = serde_json::from_str::<ProjectRequestBody>(
            r#"{"projectType": "desktop-app", "description": "x"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn audit_requires_source_code_and_ignores_prompt() {
        let body: SolanaRequestBody =
            serde_json::from_str(r#"{"type": "audit", "prompt": ""}"#).unwrap();
        assert!(matches!(body.into_request(), Err(Error::InvalidRequest(_))));

        let body: SolanaRequestBody =
            serde_json::from_str(r#"{"type": "audit", "sourceCode": "fn main() {}"}"#).unwrap();
        let request = body.into_request().unwrap();
        assert_eq!(request.source_code.as_deref(), Some("fn main() {}"));
    }

    #[test]
    fn non_audit_kinds_require_prompt() {
        let body: SolanaRequestBody =
            serde_json::from_str(r#"{"type": "program", "prompt": "  "}"#).unwrap();
        assert!(matches!(body.into_request(), Err(Error::InvalidRequest(_))));

        let body: SolanaRequestBody =
            serde_json::from_str(r#"{"type": "terminal", "prompt": "what is an SPL token?"}"#)
                .unwrap();
        assert!(body.into_request().is_ok());
    }
}
