//! Layered configuration for ringly.
//!
//! A TOML file (platform config dir by default) merged with `RINGLY_*`
//! environment variables, credential resolution for the API token, and
//! translation to [`ringly_core::RingConfig`] / [`ringly_api::TransportConfig`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use ringly_api::endpoints::{API_URI, APP_URI, OAUTH_URI};
use ringly_api::{Auth, Token, TransportConfig};
use ringly_core::{Ring, RingConfig};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable consulted when no token source is configured.
pub const TOKEN_ENV: &str = "RINGLY_TOKEN";

const ENV_PREFIX: &str = "RINGLY_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured (set `token`, `token_env`, or RINGLY_TOKEN)")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] ringly_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Primary API host.
    #[serde(default = "default_api_uri")]
    pub api_uri: String,

    /// Alternate "app" host.
    #[serde(default = "default_app_uri")]
    pub app_uri: String,

    /// OAuth token endpoint.
    #[serde(default = "default_oauth_uri")]
    pub oauth_uri: String,

    /// Client-wide request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// API token (plaintext; prefer `token_env`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Name of an environment variable holding the API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Account username, used when exchanging a password for a token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Stable hardware ID for session creation. Random per run when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_uri: default_api_uri(),
            app_uri: default_app_uri(),
            oauth_uri: default_oauth_uri(),
            timeout: default_timeout(),
            user_agent: None,
            token: None,
            token_env: None,
            username: None,
            hardware_id: None,
        }
    }
}

fn default_api_uri() -> String {
    API_URI.into()
}
fn default_app_uri() -> String {
    APP_URI.into()
}
fn default_oauth_uri() -> String {
    OAUTH_URI.into()
}
fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "ringly", "ringly").map_or_else(
        || PathBuf::from(".ringly.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading / saving ────────────────────────────────────────────────

/// `RINGLY_*` overrides. `RINGLY_TOKEN` is left out: it is the last step
/// of the token chain, not a plaintext `token`.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).ignore(&["token"])
}

impl Config {
    /// Load from the default path plus `RINGLY_*` environment variables.
    /// A missing file leaves the defaults in place.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::from_figment(Figment::new().merge(Toml::file(path)).merge(env_provider()))
    }

    /// Extract from an arbitrary figment layered over the defaults.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(figment)
            .extract()?;
        Ok(config)
    }

    /// Serialize to TOML at `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    // ── Translation ─────────────────────────────────────────────────

    fn parse_uri(field: &str, raw: &str) -> Result<Url, ConfigError> {
        raw.parse().map_err(|e| ConfigError::Validation {
            field: field.into(),
            reason: format!("invalid URL '{raw}': {e}"),
        })
    }

    /// Host URIs for the façade. Per-request timeouts are left to the
    /// transport's client-wide setting.
    pub fn ring_config(&self) -> Result<RingConfig, ConfigError> {
        Ok(RingConfig {
            api_uri: Self::parse_uri("api_uri", &self.api_uri)?,
            app_uri: Self::parse_uri("app_uri", &self.app_uri)?,
            timeout: None,
        })
    }

    pub fn transport_config(&self) -> Result<TransportConfig, ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let mut transport = TransportConfig::default()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_oauth_uri(Self::parse_uri("oauth_uri", &self.oauth_uri)?);
        if let Some(ref user_agent) = self.user_agent {
            transport.user_agent.clone_from(user_agent);
        }
        Ok(transport)
    }

    // ── Credential resolution ───────────────────────────────────────

    /// Resolve the API token: plaintext `token`, then the variable named
    /// by `token_env`, then [`TOKEN_ENV`].
    pub fn resolve_token(&self) -> Result<SecretString, ConfigError> {
        self.resolve_token_with(|name| std::env::var(name).ok())
    }

    fn resolve_token_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<SecretString, ConfigError> {
        if let Some(ref token) = self.token {
            return Ok(SecretString::from(token.clone()));
        }

        self.token_env
            .as_deref()
            .into_iter()
            .chain([TOKEN_ENV])
            .filter_map(|name| lookup(name).filter(|value| !value.is_empty()))
            .map(SecretString::from)
            .next()
            .ok_or(ConfigError::NoCredentials)
    }

    /// Exchange the configured `username` and `password` for an OAuth
    /// token at `oauth_uri`.
    pub async fn fetch_token(
        &self,
        password: &SecretString,
        otp_code: Option<&str>,
    ) -> Result<Token, ConfigError> {
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| ConfigError::Validation {
                field: "username".into(),
                reason: "required to request a token".into(),
            })?;
        let transport = self.transport_config()?;
        Ok(Auth::fetch_token(username, password, otp_code, &transport).await?)
    }

    /// Build the bearer-token transport described by this config.
    pub fn auth(&self) -> Result<Auth, ConfigError> {
        let auth = Auth::new(self.resolve_token()?, &self.transport_config()?)?;
        Ok(match self.hardware_id {
            Some(ref hardware_id) => auth.with_hardware_id(hardware_id.as_str()),
            None => auth,
        })
    }

    /// Build a façade over [`auth`](Self::auth) and
    /// [`ring_config`](Self::ring_config).
    pub fn ring(&self) -> Result<Ring, ConfigError> {
        Ok(Ring::new(self.auth()?, self.ring_config()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn from_toml(raw: &str) -> Result<Config, ConfigError> {
        Config::from_figment(Figment::new().merge(Toml::string(raw)))
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ring_config().unwrap(), RingConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let config = from_toml(
            r#"
            api_uri = "http://127.0.0.1:9000"
            timeout = 5
            user_agent = "test-agent"
            hardware_id = "hw-fixed"
            "#,
        )
        .unwrap();

        assert_eq!(config.app_uri, APP_URI);
        assert_eq!(
            config.ring_config().unwrap().api_uri.as_str(),
            "http://127.0.0.1:9000/"
        );

        let transport = config.transport_config().unwrap();
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert_eq!(transport.user_agent, "test-agent");
    }

    #[test]
    fn load_from_reads_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "username = \"someone@example.com\"\n")?;

            let config = Config::load_from(&jail.directory().join("config.toml")).unwrap();
            assert_eq!(config.username.as_deref(), Some("someone@example.com"));
            Ok(())
        });
    }

    #[test]
    fn save_writes_loadable_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            token_env: Some("MY_RING_TOKEN".into()),
            timeout: 12,
            ..Config::default()
        };

        config.save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("token_env = \"MY_RING_TOKEN\""));
        assert!(!written.contains("hardware_id"));

        let reloaded = Config::from_figment(Figment::new().merge(Toml::file(&path))).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn invalid_uri_is_validation_error() {
        let config = from_toml("app_uri = \"not a url\"").unwrap();
        match config.ring_config() {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "app_uri"),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_is_validation_error() {
        let config = from_toml("timeout = 0").unwrap();
        assert!(matches!(
            config.transport_config(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn wrong_type_is_figment_error() {
        assert!(matches!(
            from_toml("timeout = \"soon\""),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn plaintext_token_wins() {
        let config = Config {
            token: Some("plain".into()),
            token_env: Some("CUSTOM".into()),
            ..Config::default()
        };
        let token = config
            .resolve_token_with(|_| Some("from-env".into()))
            .unwrap();
        assert_eq!(token.expose_secret(), "plain");
    }

    #[test]
    fn token_env_names_the_variable() {
        let config = Config {
            token_env: Some("CUSTOM".into()),
            ..Config::default()
        };
        let token = config
            .resolve_token_with(|name| (name == "CUSTOM").then(|| "custom-token".into()))
            .unwrap();
        assert_eq!(token.expose_secret(), "custom-token");
    }

    #[test]
    fn falls_back_to_default_env_var() {
        let token = Config::default()
            .resolve_token_with(|name| (name == TOKEN_ENV).then(|| "default-token".into()))
            .unwrap();
        assert_eq!(token.expose_secret(), "default-token");
    }

    #[test]
    fn unset_token_env_falls_back_to_default_env_var() {
        let config = Config {
            token_env: Some("UNSET".into()),
            ..Config::default()
        };
        let token = config
            .resolve_token_with(|name| (name == TOKEN_ENV).then(|| "default".into()))
            .unwrap();
        assert_eq!(token.expose_secret(), "default");

        let token = config
            .resolve_token_with(|name| Some(if name == "UNSET" { "" } else { "default" }.into()))
            .unwrap();
        assert_eq!(token.expose_secret(), "default");
    }

    // ── Environment layer ───────────────────────────────────────────

    #[test]
    fn token_env_beats_ringly_token_after_load() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "token_env = \"CUSTOM_RING_TOKEN\"")?;
            jail.set_env("RINGLY_TOKEN", "from-default-env");
            jail.set_env("CUSTOM_RING_TOKEN", "from-token-env");

            let config = Config::load_from(&jail.directory().join("config.toml")).unwrap();
            assert_eq!(config.token, None);
            assert_eq!(
                config.resolve_token().unwrap().expose_secret(),
                "from-token-env"
            );
            Ok(())
        });
    }

    #[test]
    fn missing_token_env_falls_back_to_ringly_token_after_load() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "token_env = \"UNSET_RING_TOKEN\"")?;
            jail.set_env("RINGLY_TOKEN", "from-default-env");

            let config = Config::load_from(&jail.directory().join("config.toml")).unwrap();
            assert_eq!(
                config.resolve_token().unwrap().expose_secret(),
                "from-default-env"
            );
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file_values() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "timeout = 30\nusername = \"file-user\"")?;
            jail.set_env("RINGLY_TIMEOUT", "7");
            jail.set_env("RINGLY_USERNAME", "env-user");

            let config = Config::load_from(&jail.directory().join("config.toml")).unwrap();
            assert_eq!(config.timeout, 7);
            assert_eq!(config.username.as_deref(), Some("env-user"));
            Ok(())
        });
    }

    #[test]
    fn no_token_anywhere_is_no_credentials() {
        let result = Config::default().resolve_token_with(|_| Some(String::new()));
        assert!(matches!(result, Err(ConfigError::NoCredentials)));
    }

    #[test]
    fn auth_uses_configured_hardware_id() {
        let config = Config {
            token: Some("t".into()),
            hardware_id: Some("hw-fixed".into()),
            ..Config::default()
        };
        let ring = config.ring().unwrap();
        assert_eq!(ringly_api::Transport::hardware_id(ring.transport()), "hw-fixed");
    }

    // ── Token exchange ──────────────────────────────────────────────

    #[tokio::test]
    async fn fetch_token_sends_configured_username() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_partial_json(json!({
                "username": "someone@example.com",
                "password": "hunter2",
                "grant_type": "password"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "access-abc",
                "refresh_token": "refresh-def",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config {
            username: Some("someone@example.com".into()),
            oauth_uri: format!("{}/oauth/token", server.uri()),
            ..Config::default()
        };
        let token = config
            .fetch_token(&SecretString::from("hunter2".to_string()), None)
            .await
            .unwrap();

        assert_eq!(token.access_token.expose_secret(), "access-abc");
        assert_eq!(token.expires_in, Some(3600));
    }

    #[tokio::test]
    async fn fetch_token_without_username_is_validation_error() {
        let result = Config::default()
            .fetch_token(&SecretString::from("hunter2".to_string()), None)
            .await;

        match result {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "username"),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }
}
