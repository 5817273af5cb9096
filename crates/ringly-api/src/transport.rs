// Shared transport configuration for building reqwest::Client instances.
//
// `Auth` and the OAuth token flow share timeout and user-agent settings
// through this module, avoiding duplicated builder logic.

use std::future::Future;
use std::time::Duration;

use url::Url;

use crate::endpoints::OAUTH_URI;
use crate::error::Error;
use crate::request::{Request, Response};

const DEFAULT_USER_AGENT: &str = concat!("ringly/", env!("CARGO_PKG_VERSION"));

/// The authenticated request path the core crate talks through.
///
/// Implementations own authentication and failure reporting: any
/// non-success outcome is an `Err`, never a sentinel response.
pub trait Transport: Send + Sync {
    /// Perform one request and return its (successful) response.
    fn query(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send;

    /// Stable identifier for this client installation.
    fn hardware_id(&self) -> &str;
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Client-wide request timeout. Per-request timeouts override it.
    pub timeout: Duration,
    pub user_agent: String,
    /// OAuth token endpoint used by [`Auth::fetch_token`](crate::Auth::fetch_token).
    pub oauth_uri: Url,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.into(),
            oauth_uri: Url::parse(OAUTH_URI).expect("invalid OAuth URI"),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_oauth_uri(mut self, oauth_uri: Url) -> Self {
        self.oauth_uri = oauth_uri;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_vendor_oauth() {
        let config = TransportConfig::default();
        assert_eq!(config.oauth_uri.as_str(), OAUTH_URI);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("ringly/"));
    }
}
