//! Trivia game server.

use anyhow::bail;
use tracing_subscriber::EnvFilter;

use trivia_server::config::{parse_cli_or_exit, Config};
use trivia_server::{server, GameOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parse_cli_or_exit();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_cli(cli)?;
    tracing::info!(
        addr = %config.socket_addr(),
        players = config.players,
        "starting trivia-server"
    );

    match server::run(config).await? {
        GameOutcome::Completed { winner, .. } => {
            if let Some(winner) = winner {
                tracing::info!(%winner, "match complete");
            }
            Ok(())
        }
        GameOutcome::Aborted { player, reason, .. } => {
            match player {
                Some(player) => bail!("Game aborted: player {} left ({})", player, reason),
                None => bail!("Game aborted: {}", reason),
            }
        }
    }
}
