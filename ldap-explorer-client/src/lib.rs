//! # ldap-explorer-client
//!
//! An LDAP directory client that survives an unreliable network: every wire
//! call is classified, retried with exponential backoff, and transparently
//! reconnected and rebound when the transport drops.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for static and cross-compiled builds.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! ldap-explorer-client = { version = "0.1", default-features = false, features = ["rustls"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ldap_explorer_client::{ConnectionParams, DirectoryClient, SearchScope, TlsMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Describe the connection
//!     let params = ConnectionParams::new("ldap.example.com", "dc=example,dc=com")
//!         .with_tls_mode(TlsMode::StartTls)
//!         .with_bind("cn=admin,dc=example,dc=com", "secret");
//!
//!     // 2. Connect and bind
//!     let mut client = DirectoryClient::connect(params).await?;
//!
//!     // 3. Walk the first level of the tree
//!     for child in client.get_children("").await? {
//!         println!("{}", child.display_name);
//!     }
//!
//!     // 4. Page through a subtree search
//!     let mut page = client.custom_search_paged("(objectClass=person)", 50, None).await?;
//!     while let Some(cookie) = page.cookie.clone() {
//!         page = client.custom_search_paged("(objectClass=person)", 50, Some(&cookie)).await?;
//!     }
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, DirectoryError>`](DirectoryError).
//! [`DirectoryError::is_retryable`] is the single classification point:
//!
//! - [`DirectoryError::Connect`], [`DirectoryError::Timeout`],
//!   [`DirectoryError::ConnectionLost`] and [`DirectoryError::ServerUnavailable`]
//!   are retried after a reconnect.
//! - Everything else ([`DirectoryError::InvalidCredentials`],
//!   [`DirectoryError::InvalidFilter`], ...) is returned immediately.
//!
//! Retry behaviour is configured per connection with [`RetryPolicy`].

mod client;
pub mod dn;
mod error;
mod ldap;
mod retry;
mod transport;
mod tree;
mod types;
mod utils;

// Re-export error types
pub use error::{DirectoryError, Result};

// Re-export the client and its default transport
pub use client::DirectoryClient;
pub use ldap::LdapConnector;

// Re-export the transport seam (for alternative transports and tests)
pub use transport::{Connector, PageRequest, RawSearchResult, SearchRequest, Session};

// Re-export types
pub use retry::{
    DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BACKOFF, RetryPolicy,
};
pub use tree::TreeNode;
pub use types::{
    BindCredentials, ConnectionParams, DEFAULT_CONNECT_TIMEOUT, DEFAULT_LDAP_PORT,
    DEFAULT_LDAPS_PORT, DEFAULT_REQUEST_TIMEOUT, Entry, MATCH_ALL_FILTER, PageCookie, SearchPage,
    SearchScope, TlsMode,
};

// Re-export utils module
pub use utils::log_sanitizer;
