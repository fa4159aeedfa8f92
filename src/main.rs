use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devteam::agent::Agent;
use devteam::builder::StepList;
use devteam::config::{self, Config};
use devteam::llm::OllamaClient;
use devteam::output::OutputWriter;
use devteam::team::{IdeaOutcome, Team};

#[derive(Parser)]
#[command(name = "devteam")]
#[command(about = "Turn application ideas into code and unit tests with local LLM agents")]
struct Cli {
    /// Base URL of the Ollama server
    #[arg(long, env = "DEVTEAM_OLLAMA_URL", default_value = config::DEFAULT_OLLAMA_URL, global = true)]
    ollama_url: String,

    /// Model used by both agents
    #[arg(long, env = "DEVTEAM_MODEL", default_value = config::DEFAULT_MODEL, global = true)]
    model: String,

    /// Directory that receives Code/ and Tests/
    #[arg(long, env = "DEVTEAM_OUTPUT_DIR", default_value = config::DEFAULT_OUTPUT_DIR, global = true)]
    output_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, env = "DEVTEAM_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for ideas until 'exit' (default)
    Chat,
    /// Run a single idea and exit
    Run {
        /// The application idea
        idea: String,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            ollama_url: self.ollama_url.clone(),
            model: self.model.clone(),
            output_dir: self.output_dir.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Logs go to stderr so stdout carries only the generated content.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "devteam=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_team(config: &Config) -> anyhow::Result<Team> {
    let client = OllamaClient::from_config(config)?;
    let developer = Agent::developer(config.model.clone(), client.clone());
    let unit_tester = Agent::unit_tester(config.model.clone(), client);
    Ok(Team::new(
        developer,
        unit_tester,
        OutputWriter::new(config.output_dir.clone()),
    ))
}

fn print_outcome(outcome: &IdeaOutcome, steps: &StepList) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "Generated Code:")?;
    writeln!(out, "{}", outcome.code.content)?;
    writeln!(out, "Generated Unit Tests:")?;
    writeln!(out, "{}", outcome.tests.content)?;
    steps.display_steps(&mut out)?;
    out.flush()
}

async fn run_chat(team: &Team) -> anyhow::Result<()> {
    println!("Welcome to the Application Builder!");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("Enter your application idea (or type 'exit' to quit):");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let idea = line.trim();
        if idea.eq_ignore_ascii_case("exit") {
            break;
        }

        let mut steps = StepList::new();
        match team.run_idea(idea, &mut steps).await {
            Ok(outcome) => print_outcome(&outcome, &steps)?,
            Err(e) => {
                tracing::error!("Idea failed: {}", e);
                eprintln!("Error: {}", e);
            }
        }
    }

    println!("Thank you for using the Application Builder!");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.config();
    tracing::info!(url = %config.ollama_url, model = %config.model, "Using Ollama server");
    let team = build_team(&config)?;

    match cli.command {
        Some(Commands::Run { ref idea }) => {
            let mut steps = StepList::new();
            let outcome = team.run_idea(idea, &mut steps).await?;
            print_outcome(&outcome, &steps)?;
        }
        Some(Commands::Chat) | None => run_chat(&team).await?,
    }

    Ok(())
}
