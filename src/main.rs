// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use pdf_query::{
    output, Config, Credentials, PipelineOrchestrator, QuerySource, RenderMode, Validator,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pdf_query")]
#[command(version = "0.1.0")]
#[command(about = "RAG pipeline for PDF documents using LlamaParse and OpenAI", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a PDF, index it, and answer a single query
    Ask {
        /// Path to the PDF document
        file: PathBuf,

        /// Fixed query text; omit to be prompted interactively
        #[arg(short, long)]
        query: Option<String>,

        /// Render the result as a two-panel layout instead of plain text
        #[arg(long)]
        panel: bool,

        /// Also print the retrieved source nodes with similarity scores
        #[arg(long)]
        sources: bool,
    },

    /// Parse a PDF and print a preview of the markdown result
    Parse {
        /// Path to the PDF document
        file: PathBuf,

        /// Preview length in characters; omit to print everything
        #[arg(long, value_name = "CHARS")]
        preview: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    pdf_query::utils::logging::init_logger(cli.color, cli.verbose);

    info!("PDF Query RAG Pipeline");

    // Credentials are resolved before any client handle exists or any
    // network call is attempted.
    let credentials = Credentials::from_env().context("Failed to load API credentials")?;

    let config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Ask {
            file,
            query,
            panel,
            sources,
        } => {
            cmd_ask(config, credentials, file, query, panel, sources).await?;
        }
        Commands::Parse { file, preview } => {
            cmd_parse(config, credentials, file, preview).await?;
        }
    }

    Ok(())
}

async fn cmd_ask(
    config: Config,
    credentials: Credentials,
    file: PathBuf,
    query: Option<String>,
    panel: bool,
    sources: bool,
) -> Result<()> {
    let source = match query {
        Some(text) => QuerySource::Fixed(text),
        None => QuerySource::Interactive,
    };

    let mode = if panel {
        RenderMode::Panel
    } else {
        RenderMode::Plain
    };

    let orchestrator = PipelineOrchestrator::new(config, credentials);
    let response = orchestrator
        .run(&file, source)
        .await
        .context("Pipeline run failed")?;

    output::render::render(mode, &response);

    if sources {
        println!("\nSources:\n{}", response.format_sources());
    }

    Ok(())
}

async fn cmd_parse(
    config: Config,
    credentials: Credentials,
    file: PathBuf,
    preview: Option<usize>,
) -> Result<()> {
    let orchestrator = PipelineOrchestrator::new(config, credentials);
    let markdown = orchestrator
        .parse_only(&file)
        .await
        .context("Document parsing failed")?;

    match preview {
        Some(chars) => println!("{}", Validator::truncate_chars(&markdown, chars)),
        None => println!("{}", markdown),
    }

    Ok(())
}
