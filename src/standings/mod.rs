pub mod provider;

pub use provider::StandingsProvider;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Standings provider backed by the football-data.org v4 API.
/// Docs: <https://docs.football-data.org/general/v4/index.html>
pub struct FootballData {
    http: Client,
    base_url: String,
    competition: String,
    api_token: String,
}

impl FootballData {
    pub fn new(
        base_url: &str,
        competition: &str,
        api_token: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FootballData {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            competition: competition.to_string(),
            api_token: api_token.to_string(),
        })
    }
}

#[async_trait]
impl StandingsProvider for FootballData {
    fn name(&self) -> &str {
        "football-data.org"
    }

    async fn fetch_standings(&self) -> Result<Vec<u8>> {
        let url = format!("{}/competitions/{}/standings", self.base_url, self.competition);
        debug!("Fetching standings from {}", url);

        let resp = self
            .http
            .get(&url)
            .header("X-Auth-Token", &self.api_token)
            .send()
            .await
            .context("standings request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("standings fetch error, status not OK: {}", resp.status());
        }

        let body = resp
            .bytes()
            .await
            .context("cannot read standings response body")?;
        Ok(body.to_vec())
    }
}
