use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use promodeck_ai::GeminiGenerator;
use promodeck_core::{BriefExporter, BriefGenerator, BriefRequest, StudioConfig};
use promodeck_studio::{Studio, StudioServer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the studio web UI
    Serve {
        /// Port to listen on (overrides PROMODECK_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Model name (overrides PROMODECK_MODEL)
        #[arg(short, long)]
        model: Option<String>,

        /// Default API key (overrides GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Generate a single brief and print it
    Generate {
        /// Promotion period or season
        #[arg(short, long)]
        period: String,

        /// Product features to highlight
        #[arg(short, long)]
        features: String,

        /// Creativity level, 1-10
        #[arg(short, long, default_value_t = 5)]
        creativity: u8,

        /// API key for this call (falls back to GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Model name (overrides PROMODECK_MODEL)
        #[arg(short, long)]
        model: Option<String>,

        /// Output file path (prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the raw brief as JSON instead of the plain-text export
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    // Library crates log through tracing; default to info unless RUST_LOG says otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            model,
            api_key,
        } => {
            let mut config = StudioConfig::from_env();
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(model) = model {
                config.generator = config.generator.with_model(model);
            }
            if let Some(key) = api_key {
                config.generator = config.generator.with_api_key(key);
            }

            let generator = GeminiGenerator::new(config.generator.clone())
                .context("Failed to initialize the Gemini backend")?
                .with_brand(&config.brand_name, &config.brand_descriptor);

            let studio = Arc::new(Studio::new(
                Arc::new(generator),
                Duration::from_millis(config.copy_reset_ms),
            ));

            info!("Starting the Promodeck studio on port {}", config.port);
            StudioServer::new(studio)
                .start(config.port)
                .await
                .context("Studio server failed")?;
        }

        Commands::Generate {
            period,
            features,
            creativity,
            api_key,
            model,
            output,
            json,
        } => {
            let mut config = StudioConfig::from_env();
            if let Some(model) = model {
                config.generator = config.generator.with_model(model);
            }

            let generator = GeminiGenerator::new(config.generator.clone())
                .context("Failed to initialize the Gemini backend")?
                .with_brand(&config.brand_name, &config.brand_descriptor);

            let mut request = BriefRequest::new(period, features, creativity)
                .context("Invalid campaign input")?;
            if let Some(key) = api_key {
                request = request.with_api_key(key);
            }

            info!("Generating a concept brief... (this may take a while)");
            let brief = generator
                .generate(&request)
                .await
                .context("Brief generation failed")?;

            let text = if json {
                serde_json::to_string_pretty(&brief)?
            } else {
                BriefExporter::new().render(&brief)?
            };

            if let Some(out_path) = output {
                tokio::fs::write(&out_path, &text)
                    .await
                    .context("Failed to write output file")?;
                info!("Brief written to {:?}", out_path);
            } else {
                println!("{}", text);
            }
        }
    }

    Ok(())
}
