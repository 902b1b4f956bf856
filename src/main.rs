//! upview main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use upview_api::start_server;
use upview_client::{ApiToken, HttpUpClient};
use upview_config::Config;
use upview_core::{Locale, NotificationCenter, UpView};

#[derive(Parser, Debug)]
#[command(name = "upview")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web view over Up bank accounts and transactions", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load_or_default(&args.config).map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    let locale = Locale::resolve(config.locale());
    log::info!(
        "Config loaded: api_base={}, locale={}",
        config.up.api_base,
        locale.tag()
    );

    let client = HttpUpClient::new(config.accounts_url()).context("failed to build HTTP client")?;
    let notifications = Arc::new(NotificationCenter::new());
    let view = Arc::new(UpView::new(
        Arc::new(client),
        ApiToken::new(config.up.token.clone()),
        notifications.clone(),
        locale,
    ));

    tokio::spawn({
        let view = view.clone();
        async move {
            if let Err(e) = view.start().await {
                log::warn!("Initial account load failed: {}", e);
            }
        }
    });

    start_server(config, view, notifications).await?;
    Ok(())
}
