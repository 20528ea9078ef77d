// crates/trivia-client/src/main.rs

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trivia_client::config::parse_cli_or_exit;
use trivia_client::{run_session, ServerConnection, TerminalInput};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_cli_or_exit();

    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut conn = ServerConnection::connect(cli.server_addr()).await?;
    let mut input = TerminalInput::new();

    let summary = run_session(&mut conn, &mut input).await?;
    info!(
        name = %summary.name,
        questions = summary.questions_seen,
        answered = summary.answers_sent,
        said_goodbye = summary.said_goodbye,
        "session over"
    );

    Ok(())
}
