//! LLM-backed code generation: prompt templating, a model gateway, and
//! structured extraction of code/analysis/dependency fields from raw model
//! responses.

pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod handler;
pub mod kind;
pub mod logger;
pub mod prompt;
pub mod providers;
pub mod request;

pub use error::{Error, Result};
pub use extract::{ExtractionResult, ResponseExtractor};
pub use gateway::{EchoGateway, ModelGateway};
pub use handler::{RequestHandler, ResultEnvelope};
pub use kind::{ExtractionRule, Generator, RequestKind};
pub use prompt::PromptBuilder;
pub use request::{GenerationRequest, ProjectRequestBody, SolanaRequestBody};
