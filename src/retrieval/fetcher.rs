//! Physical byte retrieval
//!
//! [`Fetch`] is the seam between the retrieval cache and the outside world.
//! [`SystemFetcher`] reads local files with `tokio::fs` and remote URLs with
//! `reqwest`; tests substitute their own implementations.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use base64::Engine;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use url::Url;

use super::types::{Encoding, RetrieveError};
use crate::address::Address;
use crate::config::MonolithConfig;
use crate::error::Result;

/// Source of payloads for cache misses
pub trait Fetch: Send + Sync {
    /// Retrieve `address` as text or base64, without any caching.
    fn fetch(
        &self,
        address: &Address,
        encoding: Encoding,
    ) -> impl Future<Output = std::result::Result<String, RetrieveError>> + Send;
}

/// Filesystem and HTTP fetcher used for real conversions
#[derive(Debug, Clone)]
pub struct SystemFetcher {
    client: Client,
    user_agent: String,
}

impl SystemFetcher {
    /// Build the HTTP client from the run configuration
    pub fn new(config: &MonolithConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .danger_accept_invalid_certs(config.insecure())
            .build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent().to_string(),
        })
    }

    async fn fetch_remote(
        &self,
        url: &Url,
        encoding: Encoding,
    ) -> std::result::Result<String, RetrieveError> {
        let request_failed = |e: reqwest::Error| RetrieveError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url.as_str())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrieveError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        match encoding {
            Encoding::Text => response.text().await.map_err(request_failed),
            Encoding::Binary => {
                let bytes = response.bytes().await.map_err(request_failed)?;
                Ok(encode(&bytes, Encoding::Binary))
            }
        }
    }

    async fn fetch_local(
        path: &Path,
        encoding: Encoding,
    ) -> std::result::Result<String, RetrieveError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| RetrieveError::LocalRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(encode(&bytes, encoding))
    }
}

impl Fetch for SystemFetcher {
    async fn fetch(
        &self,
        address: &Address,
        encoding: Encoding,
    ) -> std::result::Result<String, RetrieveError> {
        match address {
            Address::Remote(url) => self.fetch_remote(url, encoding).await,
            Address::Local(path) => Self::fetch_local(path, encoding).await,
        }
    }
}

/// Render raw bytes in the requested encoding.
///
/// Text that is not valid UTF-8 is decoded lossily.
#[must_use]
pub fn encode(bytes: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Text => String::from_utf8_lossy(bytes).into_owned(),
        Encoding::Binary => base64::engine::general_purpose::STANDARD.encode(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_binary_uses_standard_alphabet() {
        assert_eq!(encode(b"body{}", Encoding::Binary), "Ym9keXt9");
        assert_eq!(encode(&[0xfb, 0xff], Encoding::Binary), "+/8=");
    }

    #[test]
    fn encode_text_is_lossy_on_invalid_utf8() {
        assert_eq!(encode(b"caf\xc3\xa9", Encoding::Text), "café");
        assert_eq!(encode(b"a\xffb", Encoding::Text), "a\u{fffd}b");
    }

    #[tokio::test]
    async fn missing_local_file_is_a_local_read_error() {
        let config = MonolithConfig::default();
        let fetcher = SystemFetcher::new(&config).unwrap();
        let address = Address::Local(std::path::PathBuf::from("/definitely/not/here.css"));

        let result = fetcher.fetch(&address, Encoding::Text).await;
        assert!(matches!(result, Err(RetrieveError::LocalRead { .. })));
    }
}
