//! MiBOT operator console - terminal dashboard for a mobile service robot
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;

use clap::Parser;
use mibot_app::Settings;
use mibot_core::prelude::*;

/// Terminal operator console for the MiBOT service robot
#[derive(Parser, Debug)]
#[command(name = "mibot")]
#[command(about = "Terminal operator console for the MiBOT service robot", long_about = None)]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Path to a config.toml (defaults to the platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Push a known robot IP to the backend before discovery, skipping the
    /// subnet scan
    #[arg(long, value_name = "IP")]
    robot_ip: Option<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    mibot_core::logging::init()?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }

    tracing::info!("backend origin: {}", settings.base_url);
    mibot_tui::run(settings, args.robot_ip).await?;

    Ok(())
}
