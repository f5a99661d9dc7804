pub mod classify;
pub mod daily;
pub mod method;

pub use classify::{ProviderError, classify};
pub use reqwest::Url;

use reqwest::{Client, ClientBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct AlphaVantageClient {
    api_key: String,
    reqwest: Client,
}

impl AlphaVantageClient {
    pub fn new(api_key: &str) -> Result<Self, FetchError> {
        let reqwest = ClientBuilder::new()
            .user_agent(concat!("tickerview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            api_key: api_key.to_string(),
            reqwest,
        })
    }

    /// Full request URL for a method call, API key included. Identical
    /// parameters always produce an identical URL.
    pub fn url<M: method::Method>(&self, params: &M::Params) -> Result<Url, FetchError> {
        let request = self
            .reqwest
            .get(M::PATH)
            .query(&[("function", M::FUNCTION)])
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .build()?;

        Ok(request.url().clone())
    }

    /// One GET, body returned as text whatever the status code. Only
    /// transport failures end up as `Err`; the body is left to `classify`.
    pub async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.reqwest.get(url.clone()).send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(%status, bytes = text.len(), "received response body");

        Ok(text)
    }

    pub async fn call<M: method::Method>(&self, params: M::Params) -> Result<String, FetchError> {
        let url = self.url::<M>(&params)?;
        self.fetch_text(&url).await
    }
}
