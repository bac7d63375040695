use async_trait::async_trait;

use super::errors::FetchError;
use crate::media::MediaBlob;

#[async_trait]
pub trait MediaFetcherPort: Send + Sync {
    /// Plain GET of `url`. A non-2xx response is a [`FetchError::Status`].
    async fn fetch(&self, url: &str) -> Result<MediaBlob, FetchError>;
}
