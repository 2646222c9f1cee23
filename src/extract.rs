use regex::Regex;
use serde::Serialize;

use crate::kind::{ExtractionRule, RequestKind};

/// Structured fields scraped from one raw model response.
///
/// Every field defaults to absent/empty when its section is missing;
/// extraction never fails on malformed text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

/// Scrapes raw model output into an `ExtractionResult` according to the
/// extraction rule of the request kind.
///
/// The model is asked to follow markdown conventions (`## Code` /
/// `## Analysis` / `## Dependencies` headers, fenced code blocks) but is not
/// trusted to: every pattern here has a fallback and none of them can fail.
pub struct ResponseExtractor {
    fence: Regex,
    code_section: Regex,
    analysis_section: Regex,
    dependencies_section: Regex,
}

impl ResponseExtractor {
    pub fn new() -> Self {
        // Language tags on fences are optional and ignored; the match must
        // not require one.
        Self {
            fence: Regex::new(r"(?s)```[A-Za-z0-9_+#.\-]*\n(.*?)```").unwrap(),
            code_section: Regex::new(r"(?is)## Code\s*\n\s*```[A-Za-z0-9_+#.\-]*\n(.*?)```")
                .unwrap(),
            analysis_section: Regex::new(r"(?is)## Analysis\s*\n(.*?)(?:\n## |\z)").unwrap(),
            dependencies_section: Regex::new(r"(?is)## Dependencies\s*\n(.*?)(?:\n## |\z)")
                .unwrap(),
        }
    }

    /// Extract structured fields from `raw` according to `kind`. Pure
    /// function of its inputs; total over arbitrary text.
    pub fn extract(&self, kind: RequestKind, raw: &str) -> ExtractionResult {
        match kind.extraction_rule() {
            ExtractionRule::CodePayload => self.extract_code_payload(raw),
            ExtractionRule::Verbatim => ExtractionResult {
                code: None,
                // The caller gets the response exactly as the model wrote
                // it, untrimmed and unparsed.
                analysis: Some(raw.to_string()),
                dependencies: Vec::new(),
            },
            ExtractionRule::Sections => self.extract_sections(raw),
        }
    }

    /// Mode A: the first fenced code block is the payload; without one, the
    /// whole trimmed response is treated as code.
    fn extract_code_payload(&self, raw: &str) -> ExtractionResult {
        let code = match self.fence.captures(raw) {
            Some(caps) => caps[1].trim().to_string(),
            None => raw.trim().to_string(),
        };
        ExtractionResult {
            code: Some(code),
            analysis: None,
            dependencies: Vec::new(),
        }
    }

    /// Mode B: `## Code`, `## Analysis` and `## Dependencies` markdown
    /// sections, each optional, each running until the next `## ` header or
    /// end of text.
    fn extract_sections(&self, raw: &str) -> ExtractionResult {
        ExtractionResult {
            code: self.section_code(raw),
            analysis: self
                .analysis_section
                .captures(raw)
                .map(|caps| caps[1].trim().to_string()),
            dependencies: self.section_dependencies(raw),
        }
    }

    fn section_code(&self, raw: &str) -> Option<String> {
        if let Some(caps) = self.code_section.captures(raw) {
            return Some(caps[1].trim().to_string());
        }
        // Last-resort heuristic: the model ignored the `## Code` contract,
        // so stitch together every fenced block found anywhere, in order.
        let blocks: Vec<&str> = self
            .fence
            .captures_iter(raw)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()).trim())
            .collect();
        if blocks.is_empty() {
            None
        } else {
            Some(blocks.join("\n\n").trim().to_string())
        }
    }

    fn section_dependencies(&self, raw: &str) -> Vec<String> {
        let Some(caps) = self.dependencies_section.captures(raw) else {
            return Vec::new();
        };
        caps[1]
            .lines()
            .map(str::trim)
            // Markdown bullet markers are dropped wholesale: a fully
            // bulleted dependency list yields an empty result.
            .filter(|line| !line.is_empty() && !line.starts_with('-') && !line.starts_with('*'))
            .map(str::to_string)
            .collect()
    }
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::new()
    }
}
