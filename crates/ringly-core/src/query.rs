// ── Relative query description ──
//
// `Query` names an endpoint by host + relative path. `Ring::query`
// resolves it against `RingConfig` into an absolute `ringly_api::Request`.

use std::time::Duration;

use ringly_api::Method;

use crate::config::Host;

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub path: String,
    pub host: Host,
    pub method: Method,
    pub params: Vec<(String, String)>,
    pub form: Option<Vec<(String, String)>>,
    pub json: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
}

impl Query {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            host: Host::Api,
            method,
            params: Vec::new(),
            form: None,
            json: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn host(mut self, host: Host) -> Self {
        self.host = host;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn form(mut self, form: Vec<(String, String)>) -> Self {
        self.form = Some(form);
        self
    }

    pub fn json(mut self, json: serde_json::Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
