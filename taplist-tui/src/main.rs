//! Taplist TUI - terminal browser for the brewery listing

mod app;
mod config;
mod ui;

use anyhow::Context;
use taplist_client::BreweryBrowser;
use tracing_subscriber::prelude::*;

use app::App;
use config::TuiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();

    // log crate adapter for dependencies that log without tracing
    tui_logger::init_logger(log::LevelFilter::Debug).ok();
    tui_logger::set_default_level(log::LevelFilter::Debug);

    let config = TuiConfig::from_env();
    tracing::info!(base_url = %config.client.base_url, "taplist starting");

    let browser =
        BreweryBrowser::connect(config.client).context("Failed to build HTTP transport")?;

    let terminal = ratatui::init();
    let result = App::new(browser).run(terminal).await;
    ratatui::restore();
    result
}
