use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use log::warn;
use std::fs;
use std::path::PathBuf;

use codesmith::config::Config;
use codesmith::gateway::{EchoGateway, ModelGateway};
use codesmith::handler::{RequestHandler, ResultEnvelope};
use codesmith::kind::RequestKind;
use codesmith::logger;
use codesmith::providers::GeminiGateway;
use codesmith::request::{ProjectRequestBody, SolanaRequestBody};

#[derive(Parser)]
#[command(name = "codesmith", version, about = "Generate code with an LLM and extract the useful parts")]
struct Args {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,
    /// Print the raw result envelope as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Write the extracted code to a file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a project component (web-app, mobile-app, dashboard, api)
    Project {
        #[arg(value_enum)]
        kind: RequestKind,
        /// What to build
        description: Vec<String>,
    },
    /// Solana development tasks (program, audit, frontend, template, terminal)
    Solana {
        #[arg(value_enum)]
        kind: RequestKind,
        /// Prompt text (ignored for audit)
        prompt: Vec<String>,
        /// File with source code to audit
        #[arg(short, long)]
        source: Option<PathBuf>,
    },
}

fn build_gateway(config: &Config) -> Box<dyn ModelGateway> {
    match GeminiGateway::new(
        Some(config.provider.model.clone()),
        Some(config.provider.temperature),
    ) {
        Ok(gateway) => Box::new(gateway.with_max_tokens(config.provider.max_tokens)),
        Err(err) => {
            warn!("{err:#}; falling back to the offline echo gateway");
            Box::new(EchoGateway)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    logger::init(args.verbose);

    let config = Config::load(&args.config)?;
    let handler = RequestHandler::new(build_gateway(&config));

    let envelope = match args.command {
        Command::Project { kind, description } => {
            let body = ProjectRequestBody {
                project_type: kind,
                description: description.join(" "),
            };
            handler.handle_project(body).await
        }
        Command::Solana { kind, prompt, source } => {
            let source_code = match source {
                Some(path) => Some(fs::read_to_string(&path).map_err(|e| {
                    anyhow::anyhow!("Failed to read source file {}: {}", path.display(), e)
                })?),
                None => None,
            };
            let body = SolanaRequestBody {
                kind,
                prompt: prompt.join(" "),
                source_code,
            };
            handler.handle_solana(body).await
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        if !envelope.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    match envelope {
        ResultEnvelope::Success { result } => {
            if let Some(code) = &result.code {
                match &args.output {
                    Some(path) => {
                        fs::write(path, code)?;
                        println!("Wrote generated code to {}", path.display());
                    }
                    None => println!("{code}"),
                }
            }
            if let Some(analysis) = &result.analysis {
                if result.code.is_some() {
                    println!("\n--- Analysis ---\n{analysis}");
                } else {
                    println!("{analysis}");
                }
            }
            if !result.dependencies.is_empty() {
                println!("\n--- Dependencies ---");
                for dep in &result.dependencies {
                    println!("{dep}");
                }
            }
            Ok(())
        }
        ResultEnvelope::Error { message } => bail!(message),
    }
}
