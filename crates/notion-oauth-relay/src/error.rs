//! Error types for the Notion OAuth relay.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors from the token exchange call.
///
/// Each exchange makes exactly one attempt; nothing here is retried.
#[derive(thiserror::Error, Debug)]
pub enum ExchangeError {
    /// The authorization code was empty.
    #[error("authorization code must not be empty")]
    MissingCode,

    /// The token endpoint returned a non-200 status.
    #[error("token endpoint returned {status}: {body}")]
    Provider {
        /// HTTP status code from the provider.
        status: u16,
        /// Raw response body, kept as diagnostic detail.
        body: String,
    },

    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("request to token endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider returned 200 but the body was not a token response.
    #[error("failed to parse token response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Terminal failure states of the callback handler.
///
/// Every variant maps to HTTP 400; the user restarts the flow from
/// `/authorize`, nothing is recovered automatically.
#[derive(thiserror::Error, Debug)]
pub enum CallbackError {
    /// The provider redirected back with an `error` query parameter.
    #[error("authorization denied by provider: {0}")]
    ProviderDenied(String),

    /// The redirect carried no authorization code.
    #[error("no authorization code received")]
    MissingCode,

    /// The `state` parameter did not match the session's stored token,
    /// or the session was missing or expired. Possible CSRF.
    #[error("invalid state parameter")]
    StateMismatch,

    /// The token exchange failed.
    #[error("token exchange failed: {0}")]
    Exchange(#[from] ExchangeError),
}

impl CallbackError {
    /// User-facing message rendered on the failure page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ProviderDenied(reason) => format!("Authorization failed: {reason}"),
            Self::MissingCode => "No authorization code received".to_string(),
            Self::StateMismatch => "Invalid state parameter".to_string(),
            Self::Exchange(ExchangeError::Provider { status, .. }) => {
                format!("Token exchange failed: provider returned HTTP {status}")
            }
            Self::Exchange(err) => format!("Token exchange failed: {err}"),
        }
    }

    /// Diagnostic detail for the failure page, when the provider sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Exchange(ExchangeError::Provider { body, .. }) if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
