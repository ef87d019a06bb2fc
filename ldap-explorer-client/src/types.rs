use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};
use crate::retry::RetryPolicy;

// ============ Connection ============

/// Default port for plain LDAP and STARTTLS.
pub const DEFAULT_LDAP_PORT: u16 = 389;
/// Default port for implicit TLS (`ldaps://`).
pub const DEFAULT_LDAPS_PORT: u16 = 636;
/// Default bound on establishing a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default bound on a single search round-trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport security mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain TCP.
    #[default]
    None,
    /// Implicit TLS at connect time.
    Ldaps,
    /// In-band TLS upgrade before bind.
    #[serde(rename = "starttls")]
    StartTls,
}

impl TlsMode {
    /// All modes, in the order a form cycles through them.
    pub const ALL: [Self; 3] = [Self::None, Self::Ldaps, Self::StartTls];

    /// Port used when none is configured.
    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            Self::Ldaps => DEFAULT_LDAPS_PORT,
            Self::None | Self::StartTls => DEFAULT_LDAP_PORT,
        }
    }

    /// URL scheme for this mode.
    #[must_use]
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Ldaps => "ldaps",
            Self::None | Self::StartTls => "ldap",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Ldaps => "LDAPS",
            Self::StartTls => "STARTTLS",
        }
    }

    /// Next mode in [`TlsMode::ALL`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Ldaps,
            Self::Ldaps => Self::StartTls,
            Self::StartTls => Self::None,
        }
    }

    /// Previous mode in [`TlsMode::ALL`], wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::None => Self::StartTls,
            Self::Ldaps => Self::None,
            Self::StartTls => Self::Ldaps,
        }
    }
}

/// Identity and secret for a simple bind.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindCredentials {
    /// Bind DN.
    pub dn: String,
    /// Bind password.
    pub password: String,
}

impl fmt::Debug for BindCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindCredentials")
            .field("dn", &self.dn)
            .field("password", &"***")
            .finish()
    }
}

/// Everything needed to open and re-open one logical connection.
///
/// A [`DirectoryClient`](crate::DirectoryClient) keeps its own copy and never
/// hands out a mutable reference: changing any field means building a new
/// value and a new client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Base DN all tree and custom searches are scoped to.
    pub base_dn: String,
    /// Transport security mode.
    pub tls_mode: TlsMode,
    /// Simple-bind identity; `None` means anonymous.
    pub bind: Option<BindCredentials>,
    /// Skip server certificate verification (testing only).
    pub skip_tls_verify: bool,
    /// Bound on establishing the transport.
    pub connect_timeout: Duration,
    /// Bound on a single search round-trip.
    pub request_timeout: Duration,
    /// Retry behaviour for every wire call.
    pub retry: RetryPolicy,
}

impl ConnectionParams {
    /// Parameters for an anonymous plain-LDAP connection on the default port.
    pub fn new(host: impl Into<String>, base_dn: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_LDAP_PORT,
            base_dn: base_dn.into(),
            tls_mode: TlsMode::None,
            bind: None,
            skip_tls_verify: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Use `mode`, switching the port to that mode's default.
    #[must_use]
    pub fn with_tls_mode(mut self, mode: TlsMode) -> Self {
        self.tls_mode = mode;
        self.port = mode.default_port();
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_bind(mut self, dn: impl Into<String>, password: impl Into<String>) -> Self {
        self.bind = Some(BindCredentials {
            dn: dn.into(),
            password: password.into(),
        });
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    #[must_use]
    pub fn with_skip_tls_verify(mut self, skip: bool) -> Self {
        self.skip_tls_verify = skip;
        self
    }

    /// `ldap://host:port` or `ldaps://host:port`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.tls_mode.scheme(), self.host, self.port)
    }

    /// Reject parameters that cannot produce a working connection.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(DirectoryError::InvalidInput("host is empty".to_string()));
        }
        if self.port == 0 {
            return Err(DirectoryError::InvalidInput("port must be non-zero".to_string()));
        }
        if self.base_dn.trim().is_empty() {
            return Err(DirectoryError::InvalidInput("base DN is empty".to_string()));
        }
        if let Some(bind) = &self.bind
            && bind.dn.trim().is_empty()
        {
            return Err(DirectoryError::InvalidInput("bind DN is empty".to_string()));
        }
        self.retry.validate()
    }
}

// ============ Search ============

/// Search breadth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchScope {
    /// The base entry only.
    Base,
    /// Immediate children of the base.
    OneLevel,
    /// The base and everything below it.
    Subtree,
}

/// Filter matching every entry.
pub const MATCH_ALL_FILTER: &str = "(objectClass=*)";

/// A directory entry: DN plus attribute values.
///
/// Attribute order carries no meaning; values keep the order the server
/// returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Distinguished name.
    pub dn: String,
    /// Attribute name to values.
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl Entry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style helper for appending a value.
    #[must_use]
    pub fn with_value(mut self, attr: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .entry(attr.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Values of `attr`, compared case-insensitively.
    pub fn values(&self, attr: &str) -> &[String] {
        self.attributes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(attr))
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// First value of `attr`, if any.
    pub fn first_value(&self, attr: &str) -> Option<&str> {
        self.values(attr).first().map(String::as_str)
    }

    /// Total number of attribute values.
    pub fn value_count(&self) -> usize {
        self.attributes.values().map(Vec::len).sum()
    }
}

/// Opaque paged-results continuation token.
///
/// Only meaningful for the exact search that produced it.
#[derive(Clone, PartialEq, Eq)]
pub struct PageCookie(Vec<u8>);

impl PageCookie {
    /// Wrap wire bytes; an empty cookie means "no more pages" and yields `None`.
    pub fn from_wire(bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            None
        } else {
            Some(Self(bytes))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PageCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageCookie({} bytes)", self.0.len())
    }
}

/// One page of a paged search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// Entries in this page.
    pub entries: Vec<Entry>,
    /// Cookie for the next page; `None` once the result set is exhausted.
    pub cookie: Option<PageCookie>,
    /// Whether another page can be requested.
    pub has_more: bool,
    /// Page size that was requested.
    pub page_size: u32,
}

impl SearchPage {
    /// Build a page from the entries and the cookie the server returned.
    pub fn from_wire(entries: Vec<Entry>, cookie: Vec<u8>, page_size: u32) -> Self {
        let cookie = PageCookie::from_wire(cookie);
        Self {
            entries,
            has_more: cookie.is_some(),
            cookie,
            page_size,
        }
    }
}
