use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which generation pipeline a kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// General project scaffolding (`{ projectType, description }` bodies).
    Project,
    /// Solana development tasks (`{ type, prompt, sourceCode? }` bodies).
    Solana,
}

/// Category of a generation request. Selects both the prompt template and
/// the extraction rule applied to the model's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum RequestKind {
    // Project generator
    WebApp,
    MobileApp,
    Dashboard,
    Api,
    // Solana generator
    Program,
    Audit,
    Frontend,
    Template,
    Terminal,
}

/// How the raw model response is scraped into structured fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// The whole response is the payload: first fenced code block if one
    /// exists, otherwise the entire trimmed text becomes `code`.
    CodePayload,
    /// No parsing at all: the raw response, byte for byte, becomes
    /// `analysis`.
    Verbatim,
    /// Markdown sections: `## Code`, `## Analysis`, `## Dependencies`.
    Sections,
}

impl RequestKind {
    pub fn generator(&self) -> Generator {
        match self {
            Self::WebApp | Self::MobileApp | Self::Dashboard | Self::Api => Generator::Project,
            Self::Program | Self::Audit | Self::Frontend | Self::Template | Self::Terminal => {
                Generator::Solana
            }
        }
    }

    pub fn extraction_rule(&self) -> ExtractionRule {
        match self {
            Self::WebApp | Self::MobileApp | Self::Dashboard | Self::Api => {
                ExtractionRule::CodePayload
            }
            Self::Audit | Self::Terminal => ExtractionRule::Verbatim,
            Self::Program | Self::Frontend | Self::Template => ExtractionRule::Sections,
        }
    }

    /// `audit` works on submitted source code; every other kind works on a
    /// free-text description.
    pub fn requires_source_code(&self) -> bool {
        matches!(self, Self::Audit)
    }

    /// Wire name of the kind (kebab-case), as it appears in request bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebApp => "web-app",
            Self::MobileApp => "mobile-app",
            Self::Dashboard => "dashboard",
            Self::Api => "api",
            Self::Program => "program",
            Self::Audit => "audit",
            Self::Frontend => "frontend",
            Self::Template => "template",
            Self::Terminal => "terminal",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
