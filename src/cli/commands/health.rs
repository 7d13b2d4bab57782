use anyhow::Context;
use clap::Args;
use serde_json::Value;

use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;

#[derive(Args)]
pub struct HealthArgs {
    #[arg(long, help = "Server base URL (defaults to http://localhost:<PORT>)")]
    pub url: Option<String>,
}

pub async fn handle(args: HealthArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let base = match args.url {
        Some(url) => url,
        None => format!("http://localhost:{}", AppConfig::from_env().server.port),
    };
    let url = format!("{}/api/health", base.trim_end_matches('/'));

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("failed to reach {}", url))?;

    let status = response.status();
    let body: Value = response.json().await.context("health response was not JSON")?;

    if !status.is_success() {
        utils::output_error(output_format, &format!("{} returned {}", url, status))?;
        anyhow::bail!("health check failed with status {}", status);
    }

    utils::output_document(output_format, &body)
}
