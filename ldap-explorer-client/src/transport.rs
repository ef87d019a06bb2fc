//! Transport seam
//!
//! The `Connector`/`Session` traits the retry loop drives. Production uses the
//! ldap3 implementation in `ldap.rs`; tests drive scripted sessions.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ConnectionParams, Entry, SearchScope};

/// One search as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Search base.
    pub base_dn: String,
    /// Search breadth.
    pub scope: SearchScope,
    /// RFC 4515 filter string.
    pub filter: String,
    /// Requested attributes; empty means all user attributes.
    pub attrs: Vec<String>,
}

impl SearchRequest {
    pub fn new(
        base_dn: impl Into<String>,
        scope: SearchScope,
        filter: impl Into<String>,
        attrs: &[&str],
    ) -> Self {
        Self {
            base_dn: base_dn.into(),
            scope,
            filter: filter.into(),
            attrs: attrs.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// Paged-results control attached to a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page size.
    pub size: u32,
    /// Continuation cookie; empty for the first page.
    pub cookie: Vec<u8>,
}

/// Entries plus the paging cookie the server returned (empty if none).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSearchResult {
    pub entries: Vec<Entry>,
    pub cookie: Vec<u8>,
}

/// Opens bound sessions.
///
/// Implementations perform the transport connect, the optional TLS upgrade
/// and the bind; a returned session is ready for searches.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Transport identifier (for logging).
    fn name(&self) -> &'static str;

    /// Connect and bind using `params`.
    async fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn Session>>;
}

/// A connected, bound session.
#[async_trait]
pub trait Session: Send {
    /// Run one search, optionally with a paged-results control.
    async fn search(
        &mut self,
        request: &SearchRequest,
        page: Option<&PageRequest>,
    ) -> Result<RawSearchResult>;

    /// Unbind and drop the transport. Errors are ignored.
    async fn close(&mut self);
}
