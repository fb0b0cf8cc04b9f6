use anyhow::Result;
use async_trait::async_trait;

/// A source of raw league standings JSON.
#[async_trait]
pub trait StandingsProvider: Send + Sync {
    /// Human-readable provider name for logs.
    fn name(&self) -> &str;

    /// Fetch the standings payload for the configured competition as raw bytes.
    async fn fetch_standings(&self) -> Result<Vec<u8>>;
}
