// ── Runtime façade configuration ──
//
// Host URIs and the default per-request timeout. Built by the caller
// (or by `ringly-config`) and handed to `Ring::new`; never touches disk.

use std::time::Duration;

use ringly_api::endpoints::{API_URI, APP_URI};
use url::Url;

/// Which host a relative endpoint path is joined onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Host {
    /// Primary API host (devices, dings, locations, groups, sessions).
    #[default]
    Api,
    /// Alternate "app" host (location modes, group devices).
    App,
}

/// Configuration for one `Ring` façade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingConfig {
    pub api_uri: Url,
    pub app_uri: Url,
    /// Timeout applied to queries that don't set their own. `None` defers
    /// to the transport's client-wide timeout.
    pub timeout: Option<Duration>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            api_uri: API_URI.parse().expect("invalid API URI"),
            app_uri: APP_URI.parse().expect("invalid app URI"),
            timeout: None,
        }
    }
}

impl RingConfig {
    pub fn host_uri(&self, host: Host) -> &Url {
        match host {
            Host::Api => &self.api_uri,
            Host::App => &self.app_uri,
        }
    }

    /// Join a relative path onto a host by plain concatenation, so a host
    /// carrying its own path prefix keeps it.
    pub fn resolve(&self, host: Host, path: &str) -> Result<Url, url::ParseError> {
        let base = self.host_uri(host).as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
    }
}
