//! Authorization-code exchange against the Notion token endpoint.
//!
//! One synchronous-looking async call per invocation: no retries, no
//! caching, no shared state. A code that the provider has invalidated
//! simply fails on the second attempt.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;

use crate::config::{Config, api};
use crate::error::{ExchangeError, ExchangeResult};
use crate::models::TokenResponse;

/// Exchanges authorization codes for access tokens.
#[derive(Clone)]
pub struct TokenExchanger {
    /// HTTP client with pinned timeouts.
    client: Client,

    /// Precomputed `Basic` authorization header value.
    basic_auth: String,

    /// Token endpoint URL.
    token_url: String,

    /// Redirect URI echoed in the exchange body.
    redirect_uri: String,
}

impl TokenExchanger {
    /// Create a new exchanger from the relay configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let credentials = format!("{}:{}", config.client_id, config.client_secret);
        let basic_auth = format!("Basic {}", STANDARD.encode(credentials));

        Ok(Self {
            client,
            basic_auth,
            token_url: config.token_url.clone(),
            redirect_uri: config.redirect_uri.clone(),
        })
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Exactly one POST per call. On a non-200 status the raw body is
    /// kept as diagnostic detail; on a 200 the body must parse as a
    /// [`TokenResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError`] on an empty code, provider rejection,
    /// transport failure, or an unparseable success body.
    pub async fn exchange(&self, code: &str) -> ExchangeResult<TokenResponse> {
        if code.is_empty() {
            return Err(ExchangeError::MissingCode);
        }

        let body = serde_json::json!({
            "grant_type": "authorization_code",
            "code": code,
            "redirect_uri": self.redirect_uri,
        });

        tracing::debug!(endpoint = %self.token_url, "Exchanging authorization code");

        let response = self
            .client
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, &self.basic_auth)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("Notion-Version", api::NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Token exchange rejected by provider");
            return Err(ExchangeError::Provider { status: status.as_u16(), body });
        }

        let text = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&text)?;

        tracing::info!(
            workspace = token.workspace_name.as_deref().unwrap_or("unknown"),
            "Token exchange succeeded"
        );

        Ok(token)
    }
}

impl std::fmt::Debug for TokenExchanger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenExchanger").field("token_url", &self.token_url).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_code_rejected_without_request() {
        let config = Config::for_testing("http://localhost:1");
        let exchanger = TokenExchanger::new(&config).unwrap();

        let result = tokio_test::block_on(exchanger.exchange(""));
        assert!(matches!(result, Err(ExchangeError::MissingCode)));
    }

    #[test]
    fn test_basic_auth_header_encoding() {
        let config = Config::for_testing("http://localhost:1");
        let exchanger = TokenExchanger::new(&config).unwrap();

        // base64("test-client-id:test-client-secret")
        let expected = STANDARD.encode("test-client-id:test-client-secret");
        assert_eq!(exchanger.basic_auth, format!("Basic {expected}"));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let config = Config::for_testing("http://localhost:1");
        let exchanger = TokenExchanger::new(&config).unwrap();
        let debug = format!("{exchanger:?}");
        assert!(!debug.contains("test-client-secret"));
    }
}
