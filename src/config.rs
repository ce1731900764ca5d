use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;

use crate::route::Route;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_POLL_SECS: u64 = crate::poller::DEFAULT_INTERVAL.as_secs();
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub route: Route,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(base_url: &str, page: &str, poll_secs: u64, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid backend url `{base_url}`"))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            bail!("backend url must be http or https, got `{base_url}`");
        }
        let route: Route = page.parse().map_err(anyhow::Error::msg)?;
        if poll_secs == 0 {
            bail!("poll interval must be at least one second");
        }
        if timeout_secs == 0 {
            bail!("request timeout must be at least one second");
        }
        Ok(Self {
            base_url,
            route,
            poll_interval: Duration::from_secs(poll_secs),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
