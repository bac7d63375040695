use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Url};
use sp_core::media::MediaBlob;
use sp_core::ports::{FetchError, MediaFetcherPort};
use tracing::debug;

/// Plain HTTP GET media fetcher.
pub struct HttpMediaFetcher {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpMediaFetcher {
    /// `timeout` of `None` lets a hung request wait forever.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build http client failed")?;
        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Resolve site-relative URLs such as `/img/hero.webp` against `base`.
    pub fn with_base_url(mut self, base: &str) -> Result<Self> {
        let base = Url::parse(base).with_context(|| format!("invalid base url: {base}"))?;
        self.base_url = Some(base);
        Ok(self)
    }

    fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        if let Ok(absolute) = Url::parse(url) {
            return Ok(absolute);
        }
        match &self.base_url {
            Some(base) => base
                .join(url)
                .map_err(|e| FetchError::Network(format!("invalid url {url}: {e}"))),
            None => Err(FetchError::Network(format!("relative url without base: {url}"))),
        }
    }
}

#[async_trait]
impl MediaFetcherPort for HttpMediaFetcher {
    async fn fetch(&self, url: &str) -> Result<MediaBlob, FetchError> {
        let target = self.resolve(url)?;
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        debug!(url, bytes = bytes.len(), mime = ?mime, "Fetched media");
        Ok(MediaBlob::new(bytes.to_vec(), mime))
    }
}
