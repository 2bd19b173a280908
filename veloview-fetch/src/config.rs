//! Transport configuration.
//!
//! Resolved once by the caller and handed to [`crate::HttpTransport`];
//! nothing inside the fetch phases branches on the environment.

use std::time::Duration;

use url::Url;

/// The Velog GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://v2cdn.velog.io/graphql";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Custom header used to relay the cookie through a same-origin proxy.
pub const DEFAULT_RELAY_HEADER: &str = "x-velog-cookie";

/// `Origin` value the endpoint expects on direct requests.
pub(crate) const VELOG_ORIGIN: &str = "https://velog.io";

/// `Referer` value the endpoint expects on direct requests.
pub(crate) const VELOG_REFERER: &str = "https://velog.io/";

/// Browser user agent sent on direct requests; the endpoint rejects
/// obviously non-browser agents.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// How the derived credential string travels with each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialHeader {
    /// Send it as the standard `cookie` header, together with the fixed
    /// `Origin`/`Referer`/`User-Agent` values the endpoint expects. This is
    /// the direct (server-side) path.
    Cookie,
    /// Send it under a custom header for a same-origin reverse proxy to
    /// rewrite into `cookie`. Browsers cannot set `cookie` directly.
    Relay(String),
}

impl Default for CredentialHeader {
    fn default() -> Self {
        Self::Cookie
    }
}

impl CredentialHeader {
    /// Relay mode with the conventional header name.
    pub fn relay() -> Self {
        Self::Relay(DEFAULT_RELAY_HEADER.to_string())
    }
}

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// GraphQL endpoint URL.
    pub endpoint: Url,
    /// How the credential travels with each request.
    pub credential_header: CredentialHeader,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            credential_header: CredentialHeader::Cookie,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TransportConfig {
    /// Creates a config for the given endpoint with default settings.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }

    /// Sets the credential header strategy.
    pub fn with_credential_header(mut self, header: CredentialHeader) -> Self {
        self.credential_header = header;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
