//! HTML pages rendered by the relay.
//!
//! Pure functions from result values to markup, kept apart from the
//! protocol handlers so they can be tested without a server. All
//! provider-controlled values are HTML-escaped to prevent XSS.

use crate::models::TokenResponse;

const STYLE: &str = r"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f8f9fa; margin: 0; padding: 40px 20px; }
.container { background: #fff; max-width: 600px; margin: 0 auto; padding: 40px; border-radius: 12px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
h1 { margin-top: 0; }
.success { color: #2f855a; }
.error { color: #c53030; }
.token { background: #f5f5f5; border: 1px solid #ddd; border-radius: 5px; padding: 15px; margin: 15px 0; word-break: break-all; font-family: monospace; }
.btn { display: inline-block; background: #0070f3; color: #fff; padding: 10px 20px; border-radius: 5px; text-decoration: none; margin: 10px 0; }
.endpoint { margin: 10px 0; padding: 10px; background: #f7fafc; border-left: 4px solid #4299e1; border-radius: 6px; }
.endpoint code { color: #2b6cb0; font-weight: bold; }
";

/// Render the welcome page listing the relay endpoints.
#[must_use]
pub fn render_index(client_id: &str, redirect_uri: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Notion OAuth Relay</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<h1>Notion OAuth Relay</h1>
<p>Authorize a Notion integration and receive its access token.</p>
<p><strong>Client ID:</strong> {client_id}</p>
<p><strong>Redirect URI:</strong> {redirect_uri}</p>
<a class="btn" href="/authorize">Start Notion authorization</a>
<h3>Endpoints</h3>
<div class="endpoint"><code>/authorize</code> &mdash; redirect to the Notion consent screen</div>
<div class="endpoint"><code>/callback</code> &mdash; OAuth redirect target, exchanges the code</div>
</div>
</body>
</html>"#,
        client_id = html_escape(client_id),
        redirect_uri = html_escape(redirect_uri),
    )
}

/// Render the success page with the workspace name and access token.
#[must_use]
pub fn render_success(token: &TokenResponse) -> String {
    let workspace = token.workspace_name.as_deref().unwrap_or("Unknown");
    let owner = token.owner_name().unwrap_or("Unknown");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Authorization succeeded</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<h1 class="success">Notion authorization succeeded</h1>
<p><strong>Workspace:</strong> {workspace}</p>
<p><strong>Owner:</strong> {owner}</p>
<h3>Access token</h3>
<div class="token">{access_token}</div>
<p><small>Keep this token private; it grants access to the workspace above.</small></p>
<p><a href="/">Back to start</a></p>
</div>
</body>
</html>"#,
        workspace = html_escape(workspace),
        owner = html_escape(owner),
        access_token = html_escape(&token.access_token),
    )
}

/// Render a failure page with a restart link.
///
/// `detail` carries the provider's raw diagnostic when one exists.
#[must_use]
pub fn render_error(message: &str, detail: Option<&str>) -> String {
    let detail_html = detail
        .map(|text| format!("<p><strong>Details:</strong> {}</p>", html_escape(text)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Authorization failed</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<h1 class="error">Authorization failed</h1>
<p>{message}</p>
{detail_html}
<p><a class="btn" href="/authorize">Restart authorization</a></p>
</div>
</body>
</html>"#,
        message = html_escape(message),
        detail_html = detail_html,
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_token() -> TokenResponse {
        serde_json::from_str(
            r#"{
                "access_token": "secret_abc123",
                "workspace_name": "Acme",
                "owner": {"user": {"name": "Ada"}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<script>alert("xss")</script>"#),
            "&lt;script&gt;alert(&quot;xss&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_success_page_shows_token_and_workspace() {
        let html = render_success(&sample_token());
        assert!(html.contains("secret_abc123"));
        assert!(html.contains("Acme"));
        assert!(html.contains("Ada"));
    }

    #[test]
    fn test_success_page_without_optional_fields() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"tok"}"#).unwrap();
        let html = render_success(&token);
        assert!(html.contains("tok"));
        assert!(html.contains("Unknown"));
    }

    #[test]
    fn test_error_page_escapes_provider_text() {
        let html = render_error("denied", Some("<img src=x onerror=alert(1)>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
        assert!(html.contains("/authorize"));
    }

    #[test]
    fn test_error_page_without_detail() {
        let html = render_error("No authorization code received", None);
        assert!(html.contains("No authorization code received"));
        assert!(!html.contains("Details:"));
    }

    #[test]
    fn test_index_lists_endpoints() {
        let html = render_index("client-1", "http://localhost:5001/callback");
        assert!(html.contains("/authorize"));
        assert!(html.contains("/callback"));
        assert!(html.contains("client-1"));
    }
}
