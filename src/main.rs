use anyhow::Result;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use voter_sheets::models::Config;
use voter_sheets::ui;

/// Terminal client for the voter data-collection workflow
#[derive(Parser, Debug)]
#[command(name = "voter-sheets", version, about = "Record voter sheets and GPS points")]
struct Args {
    /// Session token file (overrides AUTH_TOKEN_PATH)
    #[arg(long)]
    token_path: Option<String>,

    /// Directory for CSV exports (overrides EXPORT_DIR)
    #[arg(long)]
    export_dir: Option<String>,

    /// Run without the simulated GPS capability
    #[arg(long)]
    no_geolocation: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Keep logging quiet so it does not corrupt the TUI
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::ERROR)
        .with_env_filter("voter_sheets=error")
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let args = Args::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {}", e);
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(token_path) = args.token_path {
        config.token_path = token_path;
    }
    if let Some(export_dir) = args.export_dir {
        config.export_dir = export_dir;
    }
    if args.no_geolocation {
        config.geolocation_enabled = false;
    }

    if let Err(e) = ui::run_app(config).await {
        eprintln!("UI error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
