use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use reportlens::{serve, shutdown_signal, DocumentProcessor, ServiceConfig};

#[derive(Parser)]
#[command(name = "reportlens")]
#[command(about = "Classify similarity / AI-detection reports and count words in documents")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Path to config file (YAML format)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to bind, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,

        /// Upload size limit in bytes
        #[arg(long)]
        max_upload_bytes: Option<usize>,

        /// 1-based page that carries the report summary
        #[arg(long)]
        report_page: Option<usize>,
    },

    /// Classify a report file and print the JSON result
    Classify {
        /// Document to classify (.pdf, .docx or .txt)
        file: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count the words of a document and print the JSON result
    Count {
        file: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Serve {
            config,
            host,
            port,
            max_upload_bytes,
            report_page,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(limit) = max_upload_bytes {
                config.max_upload_bytes = limit;
            }
            if let Some(page) = report_page {
                config.report_page = page;
            }
            config.validate()?;
            init_tracing(&config.log_level);
            run_server(config)
        }
        Command::Classify {
            file,
            config,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            init_tracing(&config.log_level);
            let processor = DocumentProcessor::new(config)?;
            let result = processor
                .classify_file(&file)
                .with_context(|| format!("Failed to classify {}", file.display()))?;
            write_json(&result, output.as_deref())
        }
        Command::Count {
            file,
            config,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            init_tracing(&config.log_level);
            let processor = DocumentProcessor::new(config)?;
            let result = processor
                .count_words_file(&file)
                .with_context(|| format!("Failed to count words in {}", file.display()))?;
            write_json(&result, output.as_deref())
        }
    }
}

/// An explicit config path must load; otherwise fall back to the user config or defaults
fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    match path {
        Some(path) => ServiceConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ServiceConfig::load_with_fallback(None)),
    }
}

/// RUST_LOG wins over the configured level
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn run_server(config: ServiceConfig) -> Result<()> {
    let addr = config.bind_addr();
    println!("🦀 Reportlens report service");
    println!("📋 Report page: {}", config.report_page);
    println!("📁 Accepting: {}", config.allowed_extensions.join(", "));

    let processor = Arc::new(DocumentProcessor::new(config)?);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    println!("🚀 Listening on http://{addr}");
    serve(listener, processor, shutdown_signal()).await
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("💾 Result saved to: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
