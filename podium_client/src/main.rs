//! Terminal client for arranging and finalizing tournament standings.
//!
//! The client loads the teams of one tournament from the tournament service,
//! lets an organizer place them into ranks, and submits the final standings.

use anyhow::{Context, Result};
use log::info;
use pico_args::Arguments;
use podium::RankingSession;
use podium_client::{
    api_client::ApiClient,
    config::{ClientConfig, Overrides},
    logging,
    tui_app::TuiApp,
};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};

const HELP: &str = "\
Arrange and finalize tournament standings

USAGE:
  podium_client [OPTIONS]

OPTIONS:
  --server URL          Server URL  [default: env PODIUM_SERVER_URL or http://localhost:8080]
  --tournament ID       Tournament to rank  [default: env PODIUM_TOURNAMENT_ID]
  --category NAME       Game category  [default: env PODIUM_GAME_CATEGORY]

FLAGS:
  --editor              Open with edit rights  [default: env PODIUM_EDITOR or false]
  -h, --help            Print help information

ENVIRONMENT:
  PODIUM_RANK_SLOTS     Number of ranks (1-25)  [default: 25]
  PODIUM_LOCKED         Tournament has ended; open read-only  [default: false]
  PODIUM_ACCESS_TOKEN   Bearer token for the finalize call
  PODIUM_LOG_FILE       Log output file  [default: podium_client.log]
  RUST_LOG              Log filter  [default: info,reqwest=warn,hyper=warn]
  (A .env file in the working directory is loaded first)
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides {
        server_url: pargs.opt_value_from_str("--server")?,
        tournament_id: pargs.opt_value_from_str("--tournament")?,
        game_category: pargs.opt_value_from_str("--category")?,
        editor: pargs.contains("--editor").then_some(true),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {:?}", remaining);
    }

    let config = ClientConfig::from_env(overrides)?;
    config.validate()?;

    logging::init(&config.log_file)?;
    info!(
        "ranking tournament {} ({}) against {}",
        config.tournament_id, config.game_category, config.server_url
    );

    run(config).await
}

async fn run(config: ClientConfig) -> Result<()> {
    let api_client =
        ApiClient::new(config.server_url.clone()).with_access_token(config.access_token.clone());
    let session = RankingSession::new(
        config.session_config(),
        config.editor,
        config.initial_status(),
    );

    // Initialize terminal
    let terminal = ratatui::init();
    if let Err(e) = execute!(std::io::stdout(), EnableMouseCapture) {
        ratatui::restore();
        return Err(e).context("Failed to enable mouse capture");
    }

    let tui_app = TuiApp::new(session, api_client);
    let result = tui_app.run(terminal).await;

    // Restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}
