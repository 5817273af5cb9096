// Bearer-token transport
//
// `Auth` wraps `reqwest::Client` with the account's OAuth access token and
// the client's hardware identifier. It is the production `Transport`:
// status mapping lives here so callers only ever see `Ok` bodies.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, trace};

use crate::endpoints::{OAUTH_CLIENT_ID, OAUTH_SCOPE};
use crate::error::Error;
use crate::request::{Request, Response};
use crate::transport::{Transport, TransportConfig};

/// Tokens returned by the OAuth password grant.
#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: Option<u64>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
}

impl From<TokenResponse> for Token {
    fn from(raw: TokenResponse) -> Self {
        Self {
            access_token: raw.access_token.into(),
            refresh_token: raw.refresh_token.map(Into::into),
            expires_in: raw.expires_in,
        }
    }
}

/// Authenticated HTTP client for the Ring cloud API.
pub struct Auth {
    http: reqwest::Client,
    token: SecretString,
    hardware_id: String,
}

impl Auth {
    /// Create a client from an existing access token.
    ///
    /// A fresh random hardware ID is generated; use
    /// [`with_hardware_id`](Self::with_hardware_id) to keep a stable one
    /// across runs.
    pub fn new(token: SecretString, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(
            http,
            token,
            uuid::Uuid::new_v4().to_string(),
        ))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, token: SecretString, hardware_id: String) -> Self {
        Self {
            http,
            token,
            hardware_id,
        }
    }

    pub fn with_hardware_id(mut self, hardware_id: impl Into<String>) -> Self {
        self.hardware_id = hardware_id.into();
        self
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Exchange account credentials for an access token.
    ///
    /// `POST {oauth_uri}` with the password grant. Accounts with 2FA enabled
    /// answer HTTP 412 until `otp_code` is supplied, which surfaces as
    /// [`Error::TwoFactorRequired`].
    pub async fn fetch_token(
        username: &str,
        password: &SecretString,
        otp_code: Option<&str>,
        transport: &TransportConfig,
    ) -> Result<Token, Error> {
        let http = transport.build_client()?;
        let url = transport.oauth_uri.clone();

        debug!("requesting OAuth token at {}", url);

        let body = json!({
            "client_id": OAUTH_CLIENT_ID,
            "grant_type": "password",
            "username": username,
            "password": password.expose_secret(),
            "scope": OAUTH_SCOPE,
        });

        let mut builder = http.post(url).header("2fa-support", "true").json(&body);
        if let Some(code) = otp_code {
            builder = builder.header("2fa-code", code);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();

        if status == reqwest::StatusCode::PRECONDITION_FAILED {
            return Err(Error::TwoFactorRequired);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request failed (HTTP {status}): {body}"),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let token: Token = Response::new(status.as_u16(), body)
            .json_as::<TokenResponse>()?
            .into();
        debug!("token acquired");
        Ok(token)
    }

    fn build(&self, request: Request) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .bearer_auth(self.token.expose_secret());

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        if let Some(form) = request.form {
            builder = builder.form(&form);
        } else if let Some(json) = request.json {
            builder = builder.json(&json);
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder
    }
}

impl Transport for Auth {
    async fn query(&self, request: Request) -> Result<Response, Error> {
        debug!("{} {}", request.method, request.url);

        let resp = self.build(request).send().await.map_err(Error::Transport)?;
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "token expired or revoked".into(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let preview: String = body.chars().take(200).collect();
            return Err(Error::Api {
                status: status.as_u16(),
                message: preview,
            });
        }

        trace!(status = status.as_u16(), len = body.len(), "response received");
        Ok(Response::new(status.as_u16(), body))
    }

    fn hardware_id(&self) -> &str {
        &self.hardware_id
    }
}
