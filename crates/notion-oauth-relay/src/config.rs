//! Configuration for the Notion OAuth relay.

use std::time::Duration;

/// Provider constants.
pub mod api {
    use std::time::Duration;

    /// Notion consent screen URL.
    pub const AUTHORIZE_URL: &str = "https://api.notion.com/v1/oauth/authorize";

    /// Notion token endpoint.
    pub const TOKEN_URL: &str = "https://api.notion.com/v1/oauth/token";

    /// Pinned Notion API version header value.
    pub const NOTION_VERSION: &str = "2022-06-28";

    /// Outbound request timeout. The spec leaves the provider timeout
    /// open; we pin a finite 10s so a hung token endpoint never blocks
    /// a callback indefinitely.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Relay configuration, constructed once at startup and passed into the
/// handlers. Missing credentials fail fast in [`Config::from_env`]
/// instead of surfacing per-request.
#[derive(Clone)]
pub struct Config {
    /// OAuth client identifier for the Notion integration.
    pub client_id: String,

    /// OAuth client secret, used only for the Basic auth header.
    pub client_secret: String,

    /// Redirect URI registered with the integration.
    pub redirect_uri: String,

    /// Consent screen URL (overridable for tests).
    pub authorize_url: String,

    /// Token endpoint URL (overridable for tests).
    pub token_url: String,

    /// Outbound request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration with provider defaults.
    #[must_use]
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            authorize_url: api::AUTHORIZE_URL.to_string(),
            token_url: api::TOKEN_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointed at a mock provider.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            redirect_uri: "http://localhost:5001/callback".to_string(),
            authorize_url: format!("{base_url}/v1/oauth/authorize"),
            token_url: format!("{base_url}/v1/oauth/token"),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when `NOTION_CLIENT_ID`, `NOTION_CLIENT_SECRET`
    /// or `REDIRECT_URI` is unset. A placeholder redirect URI pointing
    /// at a non-existent host would break every flow silently, so an
    /// unset value is a startup error rather than a default.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from a variable lookup, so the logic is
    /// testable without mutating the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let client_id = require(&lookup, "NOTION_CLIENT_ID")?;
        let client_secret = require(&lookup, "NOTION_CLIENT_SECRET")?;
        let redirect_uri = require(&lookup, "REDIRECT_URI")?;
        Ok(Self::new(client_id, client_secret, redirect_uri))
    }
}

fn require(lookup: impl Fn(&str) -> Option<String>, name: &str) -> anyhow::Result<String> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => anyhow::bail!("missing required environment variable {name}"),
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("token_url", &self.token_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_provider_defaults() {
        let config = Config::new("id".into(), "secret".into(), "http://localhost/cb".into());
        assert_eq!(config.token_url, api::TOKEN_URL);
        assert_eq!(config.authorize_url, api::AUTHORIZE_URL);
        assert_eq!(config.request_timeout, api::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_for_testing_points_at_mock() {
        let config = Config::for_testing("http://localhost:9999");
        assert_eq!(config.token_url, "http://localhost:9999/v1/oauth/token");
        assert_eq!(config.authorize_url, "http://localhost:9999/v1/oauth/authorize");
    }

    #[test]
    fn test_from_lookup_requires_all_credentials() {
        let full = |name: &str| -> Option<String> {
            match name {
                "NOTION_CLIENT_ID" => Some("id".into()),
                "NOTION_CLIENT_SECRET" => Some("secret".into()),
                "REDIRECT_URI" => Some("http://localhost:5001/callback".into()),
                _ => None,
            }
        };
        assert!(Config::from_lookup(full).is_ok());

        for missing in ["NOTION_CLIENT_ID", "NOTION_CLIENT_SECRET", "REDIRECT_URI"] {
            let partial = |name: &str| if name == missing { None } else { full(name) };
            let err = Config::from_lookup(partial).unwrap_err();
            assert!(err.to_string().contains(missing));
        }
    }

    #[test]
    fn test_from_lookup_rejects_blank_values() {
        let blank = |name: &str| -> Option<String> {
            if name == "REDIRECT_URI" { Some("  ".into()) } else { Some("x".into()) }
        };
        assert!(Config::from_lookup(blank).is_err());
    }

    #[test]
    fn test_debug_hides_client_secret() {
        let config = Config::new("id".into(), "super-secret".into(), "uri".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("id"));
    }
}
