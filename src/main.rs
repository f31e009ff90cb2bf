//! @ai:module:intent CLI for the multiple-choice benchmark runner
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand};
use mcq_bench::{
    config::{BenchmarkConfig, ProviderKind},
    corpus::{select_range, DatasetLoader, QuestionRange},
    metrics::{MetricsAggregator, MetricsAggregatorTrait},
    report::{ConsoleReporter, JsonReporter, JsonReporterTrait, RunBanner, SummaryReport},
    runner::{BenchmarkExecutor, ProviderSet},
    ConfigError, ResultCache,
};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "mcq-bench.toml";

#[derive(Parser)]
#[command(name = "mcq-bench")]
#[command(about = "Evaluate LLMs on multiple-choice question datasets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark
    Run {
        /// Dataset name, resolved as <name>.json in the working or data directory
        #[arg(short, long, default_value = "expert_written")]
        dataset: String,

        /// Provider: anthropic, openai or gemini (default: all)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model short name, e.g. sonnet, gpt-4.1 (default: all for provider)
        #[arg(short, long)]
        model: Option<String>,

        /// Question range, e.g. 1-100 (1-indexed, inclusive)
        #[arg(short, long)]
        range: Option<String>,

        /// Maximum concurrent requests per model
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List configured models
    List {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        output: PathBuf,
    },
}

struct RunArgs {
    dataset: String,
    provider: Option<String>,
    model: Option<String>,
    range: Option<String>,
    concurrency: Option<usize>,
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mcq_bench=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            dataset,
            provider,
            model,
            range,
            concurrency,
            config,
        } => {
            let args = RunArgs {
                dataset,
                provider,
                model,
                range,
                concurrency,
                config,
            };

            tokio::select! {
                result = run_benchmark(args) => result,
                _ = tokio::signal::ctrl_c() => {
                    println!("\n\n  Interrupted.\n");
                    Ok(())
                }
            }
        }
        Commands::List { config } => list_models(config),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Evaluate the selected models on the selected questions
/// @ai:effects network, fs:read, fs:write
async fn run_benchmark(args: RunArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;

    if let Some(concurrency) = args.concurrency {
        config.run.concurrency = concurrency;
    }

    let (provider, range) = parse_selection(args.provider.as_deref(), args.range.as_deref())?;
    let models = config.select_models(provider, args.model.as_deref())?;

    let loader = DatasetLoader::new(config.paths.data_dir.clone());
    let all_questions = loader.load_by_name(&args.dataset)?;
    let dataset_size = all_questions.len();
    let questions = select_range(all_questions, range)?;

    let executor = BenchmarkExecutor::new(
        ResultCache::new(config.paths.results_dir.clone()),
        config.run.clone(),
    )?;

    // Missing API keys surface here, before any request is sent
    let providers = ProviderSet::for_models(&models, &config.api)?;

    let console = ConsoleReporter::new();
    console.print_banner(&RunBanner {
        dataset: args.dataset.clone(),
        dataset_size,
        first_index: questions.first().map_or(0, |q| q.index),
        last_index: questions.last().map_or(0, |q| q.index),
        selected: questions.len(),
        models: models.len(),
        concurrency: config.run.concurrency,
    });

    let reports = executor
        .run_all(&providers, &models, &args.dataset, &questions)
        .await;

    if reports.is_empty() {
        tracing::warn!("No model produced a result");
        return Ok(());
    }

    let ranked = MetricsAggregator::new().rank(&reports);

    if ranked.len() > 1 {
        console.print_summary(&args.dataset, &ranked);
    }

    let summary_path = JsonReporter::summary_path(&config.paths.results_dir, &args.dataset);
    JsonReporter::new().generate(&SummaryReport::new(&args.dataset, ranked), &summary_path)?;
    tracing::info!("Summary written to {}", summary_path.display());

    Ok(())
}

/// @ai:intent Parse provider and range filters so bad values fail as configuration errors
/// @ai:effects pure
fn parse_selection(
    provider: Option<&str>,
    range: Option<&str>,
) -> Result<(Option<ProviderKind>, Option<QuestionRange>), ConfigError> {
    let provider: Option<ProviderKind> = provider.map(str::parse).transpose()?;
    let range: Option<QuestionRange> = range.map(str::parse).transpose()?;
    Ok((provider, range))
}

/// @ai:intent Print configured models grouped by provider
/// @ai:effects fs:read, io
fn list_models(config: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config)?;

    println!("Available models ({}):", config.models.len());

    for provider in ProviderKind::ALL {
        let models: Vec<_> = config
            .models
            .iter()
            .filter(|m| m.provider == provider)
            .collect();

        if models.is_empty() {
            continue;
        }

        println!();
        println!("  {}", provider);
        for model in models {
            println!("    {:<20} {}", model.key, model.id);
        }
    }

    Ok(())
}

/// @ai:intent Write default configuration to disk
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = BenchmarkConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<BenchmarkConfig> {
    match path {
        Some(p) => BenchmarkConfig::load(&p),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG);

            if default_path.exists() {
                BenchmarkConfig::load(&default_path)
            } else {
                Ok(BenchmarkConfig::default())
            }
        }
    }
}
