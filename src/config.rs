use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

const DEFAULT_TEMPLATE_PATH: &str = "./build/README.md";
const DEFAULT_OUTPUT_PATH: &str = "./README.md";
const DEFAULT_API_URL: &str = "https://api.github.com";

/// Run configuration, read once at startup and passed down by reference.
#[derive(Clone)]
pub struct Config {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub access_token: String,
    pub username: String,
    pub birth_date: NaiveDateTime,
    pub api_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("template_path", &self.template_path)
            .field("output_path", &self.output_path)
            .field("access_token", &"<redacted>")
            .field("username", &self.username)
            .field("birth_date", &self.birth_date)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| anyhow!("{key} environment variable not set"))
        };

        let access_token = get("GITHUB_TOKEN")
            .or_else(|| get("ACCESS_TOKEN"))
            .context("GITHUB_TOKEN environment variable not set")?;
        let username = require("USERNAME")?;
        let birthday = require("BIRTHDAY")?;
        let birth_date = parse_birth_date(&birthday)?;

        Ok(Self {
            template_path: get("TEMPLATE_PATH")
                .unwrap_or_else(|| DEFAULT_TEMPLATE_PATH.to_string())
                .into(),
            output_path: get("OUTPUT_PATH")
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string())
                .into(),
            access_token,
            username,
            birth_date,
            api_url: get("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

/// Accepts a bare date (midnight) or a date with minutes/seconds, all UTC.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .with_context(|| format!("invalid BIRTHDAY {raw:?}, expected YYYY-MM-DD[THH:MM[:SS]]"))
}
