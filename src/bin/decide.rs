//! Decide CLI — run one decision offline from a request JSON file.
//!
//! Usage:
//!   cargo run --bin decide -- request.json
//!   cat request.json | cargo run --bin decide -- - --policy keep_options --explain

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use domino_engine::engine::models::{GameStateRequest, PlayResponse};
use domino_engine::engine::moves::TableEnds;
use domino_engine::engine::profiles::{load_default_profiles, load_profiles};
use domino_engine::engine::state::GameState;

#[derive(Parser)]
#[command(name = "decide", about = "Pick a domino move for a single game state")]
struct Cli {
    /// Request JSON file, or "-" for stdin
    input: PathBuf,

    /// Path to policy_profiles.toml
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// Policy profile name
    #[arg(long)]
    policy: Option<String>,

    /// Print open ends and every legal candidate before the decision
    #[arg(long)]
    explain: bool,
}

fn read_input(path: &PathBuf) -> Result<String, Box<dyn std::error::Error>> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e).into())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match cli.profiles {
        Some(ref path) => load_profiles(path)?,
        None => load_default_profiles(),
    };
    let policy = profiles.resolve(cli.policy.as_deref())?;

    let request: GameStateRequest = serde_json::from_str(&read_input(&cli.input)?)?;
    let state = GameState::try_from(&request)?;

    if cli.explain {
        eprintln!(
            "table: {} bones, history: {} plays",
            state.table().len(),
            state.plays().len()
        );
        match state.ends() {
            TableEnds::Start => eprintln!("table empty: opening play"),
            TableEnds::Open { left, right } => eprintln!("open ends: left={} right={}", left, right),
        }
        for c in state.candidates() {
            let placed = c.oriented();
            eprintln!("  {:#} {} ({})", placed, c.side.label(), placed);
        }
    }

    let decision = state.decide(&policy)?;
    println!("{}", serde_json::to_string_pretty(&PlayResponse::from(&decision))?);

    Ok(())
}
