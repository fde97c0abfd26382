use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use std::fs;
use tracing::info;

use crate::age;
use crate::config::Config;
use crate::github::GithubClient;
use crate::template::{TemplateData, fill_template};

/// Read the template, gather everything, and overwrite the output file.
/// The output is only written once every step has succeeded.
pub async fn update_readme(config: &Config) -> Result<()> {
    update_readme_at(config, Utc::now().naive_utc()).await
}

pub async fn update_readme_at(config: &Config, now: NaiveDateTime) -> Result<()> {
    info!(
        username = %config.username,
        template = %config.template_path.display(),
        "Updating profile README"
    );

    let template = fs::read_to_string(&config.template_path).with_context(|| {
        format!("failed to read template {}", config.template_path.display())
    })?;

    let elapsed = age::elapsed_since(config.birth_date, now)?;

    let client = GithubClient::new(&config.access_token, &config.api_url)?;
    let stats = client.fetch_stats(&config.username).await?;
    if let Some(repo) = &stats.most_starred_repo {
        info!(repo = %repo, "Most starred repository");
    }

    let filled = fill_template(&template, &TemplateData::new(elapsed, &stats));

    fs::write(&config.output_path, filled).with_context(|| {
        format!("failed to write output {}", config.output_path.display())
    })?;

    Ok(())
}
