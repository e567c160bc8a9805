mod api;
mod config;
mod console;
mod errors;
mod http_client;
mod models;
mod pages;
mod render;
#[cfg(test)]
mod testing;
mod ui;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::Api;
use crate::config::Config;
use crate::console::TerminalUi;
use crate::http_client::HttpClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so they do not interleave with rendered pages.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting recruiting console v{}", env!("CARGO_PKG_VERSION"));

    let http = HttpClient::new(config.api_base_url.clone())?;
    info!("Backend base URL: {}", http.base_url());

    let api = Api::new(http);
    let ui = Arc::new(TerminalUi::new());

    console::run(api, ui).await
}
