mod config;

use clap::{Parser, Subcommand};
use config::{GrowthConfig, API_KEY_ENV};
use growth_agent::build_generator;
use growth_orchestrator::GrowthEngine;
use growth_store::{FileReportStore, ReportStore};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "growth", about = "Growth Plan — multi-agent podcast growth plans")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "growth.toml")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every task over a transcript and store the growth plan
    Generate {
        /// Transcript file (reads stdin when omitted)
        #[arg(short, long)]
        transcript: Option<PathBuf>,
        /// Episode identifier stored with the plan (defaults to episode-<millis>)
        #[arg(long)]
        episode_id: Option<String>,
    },
    /// Re-run one task of a stored growth plan
    Rerun {
        #[arg(long)]
        report_id: String,
        #[arg(long)]
        task: String,
    },
    /// Print a stored growth plan
    Show { report_id: String },
    /// List stored growth plans
    List,
    /// List configured tasks
    Tasks,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);
    dotenvy::dotenv().ok();

    let mut config = GrowthConfig::load(&cli.config).await?;
    config.resolve_api_key(std::env::var(API_KEY_ENV).ok());
    let registry = config.registry()?;

    match cli.command {
        Commands::Generate {
            transcript,
            episode_id,
        } => {
            let input = match transcript {
                Some(path) => tokio::fs::read_to_string(&path).await.map_err(|e| {
                    anyhow::anyhow!("Failed to read transcript '{}': {e}", path.display())
                })?,
                None => {
                    let mut buf = String::new();
                    tokio::io::stdin().read_to_string(&mut buf).await?;
                    buf
                }
            };

            let engine = build_engine(&config, registry).await?;
            let report = engine
                .generate_for_episode(&input, episode_id.as_deref())
                .await?;
            info!(
                report_id = %report.id,
                episode_id = %report.episode_id,
                succeeded = report.tally.succeeded,
                total = report.tally.total,
                "Growth plan stored"
            );
            print_json(&report)?;
        }
        Commands::Rerun { report_id, task } => {
            let engine = build_engine(&config, registry).await?;
            let rerun = engine.rerun_task(&report_id, &task).await?;
            print_json(&rerun)?;
        }
        Commands::Show { report_id } => {
            let store = FileReportStore::new(config.reports_dir()).await?;
            print_json(&store.load(&report_id).await?)?;
        }
        Commands::List => {
            let store = FileReportStore::new(config.reports_dir()).await?;
            let ids = store.list().await?;
            if ids.is_empty() {
                println!("No growth plans stored in {}", config.reports_dir().display());
            }
            for id in ids {
                println!("{id}");
            }
        }
        Commands::Tasks => {
            println!("Configured tasks:");
            for spec in registry.iter() {
                println!(
                    "  {:<10} model={} temperature={} timeout={}s max_tokens={} attempts={}",
                    spec.name,
                    spec.model.model,
                    spec.model.temperature,
                    spec.budget.timeout.as_secs(),
                    spec.budget.max_output_tokens,
                    spec.budget.retry.max_attempts,
                );
            }
            println!("\nTotal: {} task(s)", registry.len());
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn build_engine(
    config: &GrowthConfig,
    registry: growth_orchestrator::TaskRegistry,
) -> anyhow::Result<GrowthEngine> {
    if config.generator.api_key.is_empty() {
        anyhow::bail!("No API key: set generator.api_key in the config or {API_KEY_ENV}");
    }
    let generator = build_generator(config.generator.clone())?;
    let store = Arc::new(FileReportStore::new(config.reports_dir()).await?);
    Ok(GrowthEngine::new(registry, generator, store).with_policy(config.transcript))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
