use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use domino_engine::engine::profiles::{load_default_profiles, load_profiles};
use domino_engine::server::DominoServer;

#[derive(Parser)]
#[command(name = "domino-engine", about = "Domino move-selection HTTP server")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "DOMINO_ENGINE_PORT")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "DOMINO_ENGINE_HOST")]
    host: IpAddr,

    /// Path to policy_profiles.toml (default: auto-discover)
    #[arg(long, env = "DOMINO_POLICY_PROFILES")]
    profiles: Option<PathBuf>,

    /// Policy profile to serve (default: the file's production default)
    #[arg(long, env = "DOMINO_POLICY")]
    policy: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let profiles = if let Some(ref path) = cli.profiles {
        load_profiles(path).map_err(|e| format!("Failed to load profiles: {}", e))?
    } else {
        load_default_profiles()
    };
    let policy = profiles.resolve(cli.policy.as_deref())?;
    tracing::info!(
        available = ?profiles.names(),
        criteria = ?policy.criteria(),
        "selected move policy"
    );

    let app = DominoServer::new(policy).router();

    let addr = SocketAddr::new(cli.host, cli.port);
    tracing::info!(%addr, "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
