//! Interactive terminal storefront.

use std::sync::Arc;

use anyhow::Context;
use bakery_storefront::{Config, HttpClient, Shell, terminal};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bakery_observability::init();

    let config = Config::from_env().context("failed to load configuration")?;
    tracing::info!(api_url = %config.api_url, "starting storefront");

    let client = HttpClient::new(config.api_url.clone());
    if !client.check_health().await {
        tracing::warn!("bakery service at {} did not report healthy", config.api_url);
    }

    let mut shell = Shell::new(Arc::new(client), config.poll_interval);
    shell.load_catalog().await;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    terminal::run(&mut shell, stdin, &mut stdout)
        .await
        .context("terminal session failed")?;

    tracing::info!("storefront closed");
    Ok(())
}
