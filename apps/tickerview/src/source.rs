use crate::config::Config;
use async_trait::async_trait;
use tickerview_alphavantage::daily::{DailyParams, TimeSeriesDaily};
use tickerview_alphavantage::{AlphaVantageClient, FetchError, Url};

/// Where daily price CSVs come from.
#[async_trait]
pub trait DailySource: Send + Sync {
    /// URL of a symbol's full daily history. The same symbol always maps to
    /// the same URL, which makes it the cache key.
    fn daily_url(&self, symbol: &str) -> Result<Url, FetchError>;

    /// One GET, raw body back.
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

pub struct AlphaVantageSource {
    client: AlphaVantageClient,
}

impl AlphaVantageSource {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        tracing::info!("Using API key: {}", config.masked_key());

        Ok(Self {
            client: AlphaVantageClient::new(&config.api_key)?,
        })
    }
}

#[async_trait]
impl DailySource for AlphaVantageSource {
    fn daily_url(&self, symbol: &str) -> Result<Url, FetchError> {
        self.client
            .url::<TimeSeriesDaily>(&DailyParams::builder().symbol(symbol).build())
    }

    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.client.fetch_text(url).await
    }
}
