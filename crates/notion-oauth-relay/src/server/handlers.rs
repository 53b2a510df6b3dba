//! HTTP handlers for the OAuth relay endpoints.
//!
//! Implements the authorization-code flow against Notion
//! (RFC 6749 §4.1): `/authorize` redirects to the consent screen with
//! a fresh anti-forgery token, `/callback` validates the redirect and
//! exchanges the code.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use url::Url;

use super::AppState;
use super::pages;
use super::session::StateStore;
use crate::error::CallbackError;

/// Name of the cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "oauth_session";

/// `GET /`
///
/// Welcome page listing the endpoints and current configuration.
pub async fn handle_index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::render_index(&state.config.client_id, &state.config.redirect_uri))
}

/// `GET /health`
pub async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "notion-oauth-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `GET /authorize`
///
/// Generate an anti-forgery token, remember it under a new session id,
/// and redirect the browser to the Notion consent screen.
pub async fn handle_authorize(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let anti_forgery = StateStore::generate_state();
    let session_id = state.states.insert(anti_forgery.clone()).await;

    let consent_url = match build_consent_url(
        &state.config.authorize_url,
        &state.config.client_id,
        &state.config.redirect_uri,
        &anti_forgery,
    ) {
        Ok(url) => url,
        Err(err) => {
            tracing::error!(error = %err, "Invalid authorize URL in configuration");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "invalid authorize URL configured" })),
            )
                .into_response();
        }
    };

    // SameSite=Lax still sends the cookie on the provider's top-level
    // GET redirect back to /callback.
    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!("Redirecting to Notion consent screen");

    (jar.add(cookie), (StatusCode::FOUND, [("Location", consent_url)])).into_response()
}

/// Build the consent URL with the spec'd query parameters.
fn build_consent_url(
    authorize_url: &str,
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> Result<String, url::ParseError> {
    let mut url = Url::parse(authorize_url)?;

    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("response_type", "code")
        .append_pair("owner", "user")
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("state", state);

    Ok(url.into())
}

/// Query parameters of the provider's redirect back to us.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// `GET /callback`
///
/// Single-transition state machine: provider error, missing code, and
/// state mismatch are terminal failures; otherwise one exchange
/// attempt decides the outcome. No step is retried.
pub async fn handle_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Response {
    match run_callback(&state, &jar, query).await {
        Ok(html) => (StatusCode::OK, Html(html)).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Callback failed");
            let html = pages::render_error(&err.user_message(), err.detail());
            (StatusCode::BAD_REQUEST, Html(html)).into_response()
        }
    }
}

async fn run_callback(
    state: &AppState,
    jar: &CookieJar,
    query: CallbackQuery,
) -> Result<String, CallbackError> {
    if let Some(error) = query.error.filter(|e| !e.is_empty()) {
        return Err(CallbackError::ProviderDenied(error));
    }

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or(CallbackError::MissingCode)?;

    verify_state(state, jar, query.state.as_deref()).await?;

    let token = state.exchanger.exchange(&code).await?;

    Ok(pages::render_success(&token))
}

/// Compare the returned `state` with the session's stored token.
///
/// The stored token is consumed even on mismatch, so a captured value
/// can never be replayed against the same session.
async fn verify_state(
    state: &AppState,
    jar: &CookieJar,
    returned: Option<&str>,
) -> Result<(), CallbackError> {
    let session_id = jar.get(SESSION_COOKIE).ok_or(CallbackError::StateMismatch)?.value();

    let expected = state
        .states
        .consume(session_id)
        .await
        .ok_or(CallbackError::StateMismatch)?;

    match returned {
        Some(value) if value == expected => Ok(()),
        _ => Err(CallbackError::StateMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_url_parameters() {
        let url = build_consent_url(
            "https://api.notion.com/v1/oauth/authorize",
            "client-1",
            "http://localhost:5001/callback",
            "state-token",
        )
        .unwrap();

        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> =
            parsed.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();

        assert!(pairs.contains(&("client_id".into(), "client-1".into())));
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&("owner".into(), "user".into())));
        assert!(pairs.contains(&("redirect_uri".into(), "http://localhost:5001/callback".into())));
        assert!(pairs.contains(&("state".into(), "state-token".into())));
    }

    #[test]
    fn test_consent_url_encodes_redirect_uri() {
        let url = build_consent_url(
            "https://api.notion.com/v1/oauth/authorize",
            "c",
            "http://localhost:5001/callback?x=1",
            "s",
        )
        .unwrap();
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A5001%2Fcallback%3Fx%3D1"));
    }

    #[test]
    fn test_invalid_authorize_url_rejected() {
        assert!(build_consent_url("not a url", "c", "r", "s").is_err());
    }
}
