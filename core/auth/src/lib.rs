//! OAuth2 login with a code-hosting provider
//!
//! Drives the authorization-code grant against GitHub, GitLab, or Bitbucket,
//! exchanges the returned code for an access token, retrieves a normalized
//! identity with a verified primary email address, and enforces an
//! allow-list/block-list policy before handing the identity back.
//!
//! # Example
//!
//! ```no_run
//! use forge_login::{HttpClient, LoginFactory, LoginSettings, MemorySessionStore};
//!
//! # async fn handle() -> Result<(), forge_login::LoginError> {
//! let settings = LoginSettings {
//!     provider: "github".to_owned(),
//!     id: Some("client-id".to_owned()),
//!     secret: Some("client-secret".to_owned()),
//!     redirect: Some("https://example.com/auth/callback".to_owned()),
//!     ..Default::default()
//! };
//!
//! let client = LoginFactory::make(&settings, HttpClient::new())?;
//! let mut session = MemorySessionStore::new();
//!
//! // send the user to the provider's consent screen
//! let url = client.redirect(&mut session, Some(&["user:email"]));
//!
//! // then, on the callback, with the `state` and `code` query parameters:
//! # let (state, code) = ("", "");
//! let user = client.login(&mut session, state, code).await?;
//! println!("logged in as {} <{}>", user.username, user.email);
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod email;
pub mod error;
pub mod factory;
pub mod provider;
pub mod providers;
pub mod session;
pub mod state;
pub mod types;
pub mod uuid;
pub mod validate;

pub use crate::client::{LoginClient, STATE_KEY};
pub use crate::config::{LoginSettings, ProviderConfig};
pub use crate::error::{LoginError, LoginErrorKind, LoginResult};
pub use crate::factory::LoginFactory;
pub use crate::provider::Provider;
pub use crate::session::{MemorySessionStore, SessionStore};
pub use crate::types::{Profile, Token, User};
pub use forge_login_http::HttpClient;
