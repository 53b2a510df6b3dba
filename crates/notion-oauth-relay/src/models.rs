//! Response types returned by the Notion token endpoint.

use serde::{Deserialize, Serialize};

/// Successful token exchange response.
///
/// Notion returns more fields than we render; unknown fields are
/// ignored so a provider-side addition never breaks parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque access token for the Notion API.
    pub access_token: String,

    /// Human-readable name of the authorized workspace.
    #[serde(default)]
    pub workspace_name: Option<String>,

    /// Workspace identifier.
    #[serde(default)]
    pub workspace_id: Option<String>,

    /// Bot user identifier for the integration.
    #[serde(default)]
    pub bot_id: Option<String>,

    /// The user who authorized the integration.
    #[serde(default)]
    pub owner: Option<Owner>,
}

/// Owner block of a token response: `{"owner": {"user": {...}}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    /// The authorizing user, when owner type is `user`.
    #[serde(default)]
    pub user: Option<OwnerUser>,
}

/// Minimal user info inside the owner block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerUser {
    /// User identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl TokenResponse {
    /// Display name of the authorizing user, if the provider sent one.
    #[must_use]
    pub fn owner_name(&self) -> Option<&str> {
        self.owner.as_ref()?.user.as_ref()?.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_response() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","workspace_name":"W"}"#).unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.workspace_name.as_deref(), Some("W"));
        assert!(parsed.owner.is_none());
        assert!(parsed.owner_name().is_none());
    }

    #[test]
    fn test_parse_full_response() {
        let parsed: TokenResponse = serde_json::from_str(
            r#"{
                "access_token": "secret_tok",
                "workspace_name": "Acme",
                "workspace_id": "ws_1",
                "bot_id": "bot_1",
                "owner": {"user": {"id": "u_1", "name": "Ada"}}
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.owner_name(), Some("Ada"));
        assert_eq!(parsed.workspace_id.as_deref(), Some("ws_1"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let parsed: TokenResponse = serde_json::from_str(
            r#"{"access_token":"t","token_type":"bearer","duplicated_template_id":null}"#,
        )
        .unwrap();
        assert_eq!(parsed.access_token, "t");
    }

    #[test]
    fn test_missing_access_token_is_error() {
        let parsed = serde_json::from_str::<TokenResponse>(r#"{"workspace_name":"W"}"#);
        assert!(parsed.is_err());
    }
}
