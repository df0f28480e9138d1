//! bbsim CLI
//!
//! JSON 요청 파일 → 시뮬레이션 결과 JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bb_core::EngineConfig;

#[derive(Parser)]
#[command(name = "bbsim")]
#[command(version, about = "Baseball game simulation from JSON requests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game from a GameRequest JSON file
    SimulateGame {
        /// Input request JSON file path
        #[arg(long)]
        input: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print the response
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Simulate one day of games from a DayRequest JSON file
    SimulateDay {
        /// Input request JSON file path
        #[arg(long)]
        input: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print the response
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Print an engine config preset as JSON
    Config {
        #[arg(long, value_enum, default_value = "realistic")]
        preset: Preset,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Realistic,
    Classic,
    Deterministic,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::SimulateGame {
            input,
            output,
            pretty,
        } => {
            let request = read_request(&input)?;
            let response = bb_core::simulate_game_json(&request)
                .with_context(|| format!("Game simulation failed for {}", input.display()))?;
            write_response(&response, output.as_deref(), pretty)?;
        }

        Commands::SimulateDay {
            input,
            output,
            pretty,
        } => {
            let request = read_request(&input)?;
            let response = bb_core::simulate_day_json(&request)
                .with_context(|| format!("Day simulation failed for {}", input.display()))?;
            write_response(&response, output.as_deref(), pretty)?;
        }

        Commands::Config { preset } => {
            let config = match preset {
                Preset::Realistic => EngineConfig::realistic(),
                Preset::Classic => EngineConfig::classic(),
                Preset::Deterministic => EngineConfig::deterministic(),
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn read_request(path: &Path) -> Result<String> {
    info!(input = %path.display(), "reading request");
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_response(response: &str, output: Option<&Path>, pretty: bool) -> Result<()> {
    let body = if pretty {
        let value: serde_json::Value =
            serde_json::from_str(response).context("Engine returned invalid JSON")?;
        serde_json::to_string_pretty(&value)?
    } else {
        response.to_string()
    };

    match output {
        Some(path) => {
            fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), "response written");
        }
        None => println!("{}", body),
    }
    Ok(())
}
