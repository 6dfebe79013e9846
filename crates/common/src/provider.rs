//! Commonly used helpers to construct `Provider`s

use alloy_provider::{DynProvider, Provider, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_transport::utils::guess_local_url;
use alloy_transport_http::{Http, reqwest};
use eyre::{Result, WrapErr};
use std::time::Duration;
use url::Url;

/// The default HTTP request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// Type-erased provider over an HTTP JSON-RPC endpoint.
pub type EthProvider = DynProvider;

/// Helper type to construct an [`EthProvider`]
#[derive(Debug)]
pub struct ProviderBuilder {
    // Note: this is a result, so we can easily chain builder calls
    url: Result<Url>,
    timeout: Duration,
}

// === impl ProviderBuilder ===

impl ProviderBuilder {
    /// Creates a new builder instance
    pub fn new(url_str: &str) -> Self {
        let url_str = url_str.trim();

        // invalid url: non-prefixed URL scheme is not allowed, so we prepend the default http
        // prefix
        let url = if url_str.starts_with("localhost:") {
            Url::parse(&format!("http://{url_str}"))
        } else {
            Url::parse(url_str)
        }
        .wrap_err_with(|| format!("invalid provider URL: {url_str:?}"));

        Self { url, timeout: REQUEST_TIMEOUT }
    }

    /// Sets the request timeout.
    ///
    /// The timeout is applied from when the request starts connecting until the
    /// response body has finished.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn client(self) -> Result<RpcClient> {
        let Self { url, timeout } = self;
        let url = url?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => eyre::bail!("unsupported provider URL scheme `{scheme}`: {url}"),
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("failed to build HTTP client")?;
        let is_local = guess_local_url(&url);
        trace!(%url, ?timeout, is_local, "building RPC client");

        Ok(RpcClient::new(Http::with_client(http, url), is_local))
    }

    /// Constructs the provider. Signing is layered on top by the caller.
    pub fn build(self) -> Result<EthProvider> {
        Ok(RootProvider::new(self.client()?).erased())
    }
}
