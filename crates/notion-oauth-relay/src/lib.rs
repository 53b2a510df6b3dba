//! Notion OAuth Relay
//!
//! A minimal OAuth 2.0 authorization-code relay for the Notion API:
//! redirect the user to the consent screen, receive the callback,
//! exchange the authorization code server-side, and display the
//! access token.
//!
//! # Flow
//!
//! browser → `/authorize` (302) → Notion consent → browser →
//! `/callback` → token endpoint → rendered result page.
//!
//! # Example
//!
//! ```no_run
//! use notion_oauth_relay::{config::Config, server::RelayServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     RelayServer::new(config)?.run(5001).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod exchange;
pub mod models;
pub mod server;

pub use config::Config;
pub use error::{CallbackError, ExchangeError};
pub use exchange::TokenExchanger;
pub use models::TokenResponse;
