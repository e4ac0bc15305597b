use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use quiz_master::{QuestionSource, Quiz, QuizConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Timed multiple-choice quiz in the terminal", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file to load the questions from instead of the trivia service
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Number of questions to fetch
    #[arg(short, long)]
    amount: Option<u32>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quiz_master=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<QuizConfig> {
    let mut config = match &args.config {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };

    if let Some(path) = &args.questions {
        config.source = QuestionSource::File { path: path.clone() };
    }
    if let Some(amount) = args.amount {
        config.set_amount(amount);
    }
    if let Some(path) = &args.log_file {
        config.log_file = Some(path.clone());
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }

    Quiz::new(config).run().await.context("quiz terminated")
}
