//! The resilient directory client
//!
//! Every wire call goes through [`DirectoryClient::execute`], which applies the
//! connection's [`RetryPolicy`](crate::RetryPolicy): retryable failures tear
//! down the session, reconnect and rebind with the stored parameters, sleep
//! for the current backoff and try again. Terminal failures are returned on
//! the spot.

use std::fmt;
use std::sync::Arc;

use crate::error::{DirectoryError, Result};
use crate::ldap::LdapConnector;
use crate::transport::{Connector, PageRequest, RawSearchResult, SearchRequest, Session};
use crate::tree::TreeNode;
use crate::types::{ConnectionParams, Entry, MATCH_ALL_FILTER, PageCookie, SearchPage, SearchScope};
use crate::utils::log_sanitizer::{summarize_dns, truncate_for_log};

/// Attributes requested when fetching a single entry: all user and operational.
const ENTRY_ATTRS: &[&str] = &["*", "+"];

/// "No attributes" (RFC 4511 §4.5.1.8); used when only DNs are needed.
const NO_ATTRS: &[&str] = &["1.1"];

/// Page size used internally to drain child listings.
const CHILDREN_PAGE_SIZE: u32 = 500;

/// A connected, bound directory client.
///
/// Holds the immutable [`ConnectionParams`] it was built from; reconnects
/// during retry reuse them unchanged.
pub struct DirectoryClient {
    params: ConnectionParams,
    connector: Arc<dyn Connector>,
    session: Option<Box<dyn Session>>,
}

impl fmt::Debug for DirectoryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryClient")
            .field("url", &self.params.url())
            .field("base_dn", &self.params.base_dn)
            .field("transport", &self.connector.name())
            .field("connected", &self.session.is_some())
            .finish()
    }
}

impl DirectoryClient {
    /// Connect and bind to a real LDAP server.
    pub async fn connect(params: ConnectionParams) -> Result<Self> {
        Self::connect_with(params, Arc::new(LdapConnector)).await
    }

    /// Connect and bind through an explicit [`Connector`].
    ///
    /// Parameters are validated before any network activity. The initial
    /// connect is retried like any other wire call.
    pub async fn connect_with(
        params: ConnectionParams,
        connector: Arc<dyn Connector>,
    ) -> Result<Self> {
        params.validate()?;

        let attempts = params.retry.attempts();
        let mut attempt = 1;
        let session = loop {
            match connector.connect(&params).await {
                Ok(session) => break session,
                Err(e) if attempt < attempts && e.is_retryable() => {
                    let delay = params.retry.backoff(attempt);
                    log::warn!(
                        "[{}] Connect failed (attempt {attempt}/{attempts}), retrying in {}ms: {e}",
                        connector.name(),
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    log_failure(connector.name(), "connect", &e);
                    return Err(e);
                }
            }
        };

        log::info!(
            "[{}] Connected to {} as {}",
            connector.name(),
            params.url(),
            params.bind.as_ref().map_or("<anonymous>", |b| b.dn.as_str())
        );

        Ok(Self {
            params,
            connector,
            session: Some(session),
        })
    }

    /// The parameters this client was built from.
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// The configured base DN.
    pub fn base_dn(&self) -> &str {
        &self.params.base_dn
    }

    /// Whether a session is currently open.
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Unbind and drop the session. Safe to call more than once.
    pub async fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close().await;
            log::info!("[{}] Disconnected from {}", self.connector.name(), self.params.url());
        }
    }

    /// Search and return every matching entry.
    pub async fn search(
        &mut self,
        base_dn: &str,
        filter: &str,
        scope: SearchScope,
        attrs: &[&str],
    ) -> Result<Vec<Entry>> {
        let filter = normalize_filter(filter)?;
        let request = SearchRequest::new(base_dn, scope, filter, attrs);
        Ok(self.execute(&request, None).await?.entries)
    }

    /// Fetch one page of a paged search.
    ///
    /// Pass `None` as the cookie for the first page and the previous page's
    /// cookie afterwards. The returned page has `has_more == false` once the
    /// server reports an empty cookie.
    pub async fn search_paged(
        &mut self,
        base_dn: &str,
        filter: &str,
        scope: SearchScope,
        attrs: &[&str],
        page_size: u32,
        cookie: Option<&PageCookie>,
    ) -> Result<SearchPage> {
        if page_size == 0 {
            return Err(DirectoryError::InvalidInput(
                "page size must be at least 1".to_string(),
            ));
        }
        let filter = normalize_filter(filter)?;
        let request = SearchRequest::new(base_dn, scope, filter, attrs);
        let page = PageRequest {
            size: page_size,
            cookie: cookie.map(|c| c.as_bytes().to_vec()).unwrap_or_default(),
        };
        let RawSearchResult { entries, cookie } = self.execute(&request, Some(&page)).await?;
        Ok(SearchPage::from_wire(entries, cookie, page_size))
    }

    /// Paged subtree search under the base DN returning all user attributes.
    pub async fn custom_search_paged(
        &mut self,
        filter: &str,
        page_size: u32,
        cookie: Option<&PageCookie>,
    ) -> Result<SearchPage> {
        let base_dn = self.params.base_dn.clone();
        self.search_paged(&base_dn, filter, SearchScope::Subtree, &[], page_size, cookie)
            .await
    }

    /// Fetch a single entry with all user and operational attributes.
    pub async fn get_entry(&mut self, dn: &str) -> Result<Entry> {
        if dn.trim().is_empty() {
            return Err(DirectoryError::InvalidInput("entry DN must not be empty".to_string()));
        }
        let request = SearchRequest::new(dn, SearchScope::Base, MATCH_ALL_FILTER, ENTRY_ATTRS);
        self.execute(&request, None)
            .await?
            .entries
            .into_iter()
            .next()
            .ok_or_else(|| DirectoryError::NoSuchObject { dn: dn.to_string() })
    }

    /// Immediate children of `dn` (or of the base DN when `dn` is empty).
    ///
    /// The returned nodes are unloaded and named relative to their parent.
    pub async fn get_children(&mut self, dn: &str) -> Result<Vec<TreeNode>> {
        let parent = if dn.trim().is_empty() {
            self.params.base_dn.clone()
        } else {
            dn.to_string()
        };

        let mut children = Vec::new();
        let mut cookie = None;
        loop {
            let page = self
                .search_paged(
                    &parent,
                    MATCH_ALL_FILTER,
                    SearchScope::OneLevel,
                    NO_ATTRS,
                    CHILDREN_PAGE_SIZE,
                    cookie.as_ref(),
                )
                .await?;
            children.extend(page.entries.into_iter().map(|e| TreeNode::new(e.dn, &parent)));
            match page.cookie {
                Some(next) => cookie = Some(next),
                None => break,
            }
        }

        log::debug!(
            "[{}] {} children under {parent}: {}",
            self.connector.name(),
            children.len(),
            summarize_dns(children.iter().map(|c| c.dn.as_str()))
        );
        Ok(children)
    }

    /// Populate `node`'s children unless they are already loaded.
    pub async fn load_children(&mut self, node: &mut TreeNode) -> Result<()> {
        if node.is_loaded() {
            return Ok(());
        }
        let children = self.get_children(&node.dn).await?;
        node.set_children(children);
        Ok(())
    }

    /// Run one wire call under the retry policy.
    async fn execute(
        &mut self,
        request: &SearchRequest,
        page: Option<&PageRequest>,
    ) -> Result<RawSearchResult> {
        let name = self.connector.name();
        let attempts = self.params.retry.attempts();
        let mut attempt = 1;

        loop {
            let outcome = match self.session.as_mut() {
                Some(session) => session.search(request, page).await,
                None => Err(DirectoryError::ConnectionLost {
                    detail: "no open session".to_string(),
                }),
            };

            match outcome {
                Ok(result) => return Ok(result),
                Err(e) if attempt < attempts && e.is_retryable() => {
                    let delay = self.params.retry.backoff(attempt);
                    log::warn!(
                        "[{name}] Search failed (attempt {attempt}/{attempts}), reconnecting and retrying in {}ms: {e}",
                        delay.as_millis()
                    );
                    if let Err(reconnect_err) = self.reconnect().await {
                        log::warn!("[{name}] Reconnect failed, giving up: {reconnect_err}");
                        return Err(e);
                    }
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    log_failure(name, &truncate_for_log(&request.filter), &e);
                    return Err(e);
                }
            }
        }
    }

    /// Close the current session (if any) and open a fresh one.
    async fn reconnect(&mut self) -> Result<()> {
        if let Some(mut old) = self.session.take() {
            old.close().await;
        }
        let session = self.connector.connect(&self.params).await?;
        self.session = Some(session);
        Ok(())
    }
}

/// Wrap a bare filter in parentheses; reject blank ones.
fn normalize_filter(filter: &str) -> Result<String> {
    let filter = filter.trim();
    if filter.is_empty() {
        return Err(DirectoryError::InvalidInput(
            "search filter must not be empty".to_string(),
        ));
    }
    if filter.starts_with('(') {
        Ok(filter.to_string())
    } else {
        Ok(format!("({filter})"))
    }
}

fn log_failure(name: &str, what: &str, err: &DirectoryError) {
    if err.is_expected() {
        log::warn!("[{name}] {what} failed: {err}");
    } else {
        log::error!("[{name}] {what} failed: {err}");
    }
}
