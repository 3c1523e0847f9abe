use async_trait::async_trait;
use reqwest::Client;

use quiz_core::Question;

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::provider::{QuestionProvider, decode_batch};

/// Question provider backed by the Open Trivia DB HTTP API.
#[derive(Clone, Debug)]
pub struct OpenTdbProvider {
    client: Client,
    config: ProviderConfig,
}

impl OpenTdbProvider {
    /// Build a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Http` if the HTTP client cannot be constructed.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a provider around an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl QuestionProvider for OpenTdbProvider {
    async fn fetch_batch(&self) -> Result<Vec<Question>, ProviderError> {
        let url = self.config.request_url()?;
        tracing::debug!(%url, "requesting question batch");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus(status));
        }

        let body = response.text().await?;
        decode_batch(&body)
    }
}
