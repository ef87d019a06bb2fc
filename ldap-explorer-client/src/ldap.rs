//! `ldap3`-backed transport
//!
//! Connect, optional STARTTLS/implicit TLS, simple bind, and searches with the
//! RFC 2696 paged-results control. All `ldap3` errors are mapped to
//! [`DirectoryError`] here and nowhere else.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use ldap3::controls::{Control, ControlType, PagedResults};
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry};

use crate::error::{DirectoryError, Result};
use crate::transport::{Connector, PageRequest, RawSearchResult, SearchRequest, Session};
use crate::types::{ConnectionParams, Entry, SearchScope, TlsMode};
use crate::utils::log_sanitizer::truncate_for_log;

const TRANSPORT_NAME: &str = "ldap";

/// Connector that opens real LDAP connections.
#[derive(Debug, Default, Clone, Copy)]
pub struct LdapConnector;

#[async_trait]
impl Connector for LdapConnector {
    fn name(&self) -> &'static str {
        TRANSPORT_NAME
    }

    async fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn Session>> {
        let url = params.url();
        log::debug!(
            "[{TRANSPORT_NAME}] Connecting to {url} (tls: {})",
            params.tls_mode.label()
        );

        let settings = LdapConnSettings::new()
            .set_conn_timeout(params.connect_timeout)
            .set_starttls(params.tls_mode == TlsMode::StartTls)
            .set_no_tls_verify(params.skip_tls_verify);

        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &url)
            .await
            .map_err(|e| map_ldap_error(e, "", ""))?;

        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                log::warn!("[{TRANSPORT_NAME}] Connection driver stopped: {e}");
            }
        });

        let (bind_dn, password) = params
            .bind
            .as_ref()
            .map_or(("", ""), |b| (b.dn.as_str(), b.password.as_str()));
        log::debug!(
            "[{TRANSPORT_NAME}] Binding as {}",
            if bind_dn.is_empty() { "<anonymous>" } else { bind_dn }
        );

        let bound = ldap
            .with_timeout(params.request_timeout)
            .simple_bind(bind_dn, password)
            .await
            .and_then(ldap3::LdapResult::success);

        if let Err(e) = bound {
            let _ = ldap.unbind().await;
            return Err(map_ldap_error(e, bind_dn, ""));
        }

        Ok(Box::new(LdapSession {
            ldap,
            request_timeout: params.request_timeout,
        }))
    }
}

/// A bound `ldap3` handle.
struct LdapSession {
    ldap: Ldap,
    request_timeout: Duration,
}

#[async_trait]
impl Session for LdapSession {
    async fn search(
        &mut self,
        request: &SearchRequest,
        page: Option<&PageRequest>,
    ) -> Result<RawSearchResult> {
        log::debug!(
            "[{TRANSPORT_NAME}] search base={:?} scope={:?} filter={} page={:?}",
            request.base_dn,
            request.scope,
            truncate_for_log(&request.filter),
            page.map(|p| (p.size, p.cookie.len()))
        );

        let ldap = self.ldap.with_timeout(self.request_timeout);
        if let Some(page) = page {
            ldap.with_controls(PagedResults {
                size: i32::try_from(page.size).unwrap_or(i32::MAX),
                cookie: page.cookie.clone(),
            });
        }

        let (entries, result) = ldap
            .search(
                &request.base_dn,
                to_scope(request.scope),
                &request.filter,
                &request.attrs,
            )
            .await
            .and_then(ldap3::SearchResult::success)
            .map_err(|e| map_ldap_error(e, &request.base_dn, &request.filter))?;

        let cookie = result
            .ctrls
            .iter()
            .find_map(|ctrl| match ctrl {
                Control(Some(ControlType::PagedResults), raw) => {
                    Some(raw.parse::<PagedResults>().cookie)
                }
                _ => None,
            })
            .unwrap_or_default();

        let entries: Vec<Entry> = entries
            .into_iter()
            .map(|raw| to_entry(SearchEntry::construct(raw)))
            .collect();

        log::debug!(
            "[{TRANSPORT_NAME}] search returned {} entries, cookie {} bytes",
            entries.len(),
            cookie.len()
        );

        Ok(RawSearchResult { entries, cookie })
    }

    async fn close(&mut self) {
        if let Err(e) = self.ldap.unbind().await {
            log::debug!("[{TRANSPORT_NAME}] unbind failed (ignored): {e}");
        }
    }
}

fn to_scope(scope: SearchScope) -> Scope {
    match scope {
        SearchScope::Base => Scope::Base,
        SearchScope::OneLevel => Scope::OneLevel,
        SearchScope::Subtree => Scope::Subtree,
    }
}

/// Binary values are shown as a size marker rather than decoded.
fn to_entry(raw: SearchEntry) -> Entry {
    let mut entry = Entry::new(raw.dn);
    entry.attributes.extend(raw.attrs);
    for (name, values) in raw.bin_attrs {
        entry.attributes.entry(name).or_default().extend(
            values
                .iter()
                .map(|v| format!("<binary, {} bytes>", v.len())),
        );
    }
    entry
}

/// Map an `ldap3` error to the client's taxonomy.
fn map_ldap_error(err: LdapError, dn: &str, filter: &str) -> DirectoryError {
    match err {
        LdapError::LdapResult { result } => {
            DirectoryError::from_result_code(result.rc, &result.text, dn, filter)
        }
        LdapError::Io { source } => map_io_error(&source),
        LdapError::FilterParsing => DirectoryError::InvalidFilter {
            filter: filter.to_string(),
        },
        LdapError::Timeout { .. } => DirectoryError::Timeout {
            detail: err.to_string(),
        },
        other => DirectoryError::from_transport_text(other.to_string()),
    }
}

fn map_io_error(err: &io::Error) -> DirectoryError {
    use io::ErrorKind;

    let detail = err.to_string();
    match err.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => DirectoryError::Timeout { detail },
        ErrorKind::ConnectionRefused
        | ErrorKind::NotConnected
        | ErrorKind::AddrNotAvailable
        | ErrorKind::HostUnreachable
        | ErrorKind::NetworkUnreachable => DirectoryError::Connect { detail },
        ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::BrokenPipe
        | ErrorKind::UnexpectedEof => DirectoryError::ConnectionLost { detail },
        _ => DirectoryError::from_transport_text(detail),
    }
}
