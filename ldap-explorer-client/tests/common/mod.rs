//! 共享测试工具和辅助函数
//!
//! `FakeDirectory` 是一个脚本化的内存目录：实现 `Connector`/`Session`，
//! 可预先排队连接失败与搜索失败，并统计连接、搜索、关闭次数。

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use ldap_explorer_client::{
    ConnectionParams, Connector, DirectoryError, Entry, PageRequest, RawSearchResult,
    Result, RetryPolicy, SearchRequest, SearchScope, Session, dn,
};

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const BASE_DN: &str = "dc=example,dc=com";
pub const PEOPLE_DN: &str = "ou=people,dc=example,dc=com";

/// 脚本状态
#[derive(Debug, Default)]
struct Script {
    entries: Vec<Entry>,
    connect_failures: VecDeque<DirectoryError>,
    search_failures: VecDeque<DirectoryError>,
    connects: u32,
    searches: u32,
    closes: u32,
    cookies: Vec<Vec<u8>>,
}

/// 脚本化的内存目录
#[derive(Debug, Clone, Default)]
pub struct FakeDirectory {
    script: Arc<Mutex<Script>>,
}

impl FakeDirectory {
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let dir = Self::default();
        dir.lock().entries = entries;
        dir
    }

    /// 一个小型示例目录：根、两个 OU、`people` 下 `n` 个人员
    pub fn sample(people: usize) -> Self {
        let mut entries = vec![
            Entry::new(BASE_DN).with_value("objectClass", "domain"),
            Entry::new(PEOPLE_DN).with_value("objectClass", "organizationalUnit"),
            Entry::new("ou=groups,dc=example,dc=com").with_value("objectClass", "organizationalUnit"),
        ];
        for i in 0..people {
            entries.push(
                Entry::new(format!("uid=user{i},{PEOPLE_DN}"))
                    .with_value("objectClass", "person")
                    .with_value("uid", format!("user{i}"))
                    .with_value("cn", format!("User {i}")),
            );
        }
        Self::with_entries(entries)
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 下一次连接返回 `err`
    pub fn fail_connect(&self, err: DirectoryError) {
        self.lock().connect_failures.push_back(err);
    }

    /// 下一次搜索返回 `err`
    pub fn fail_search(&self, err: DirectoryError) {
        self.lock().search_failures.push_back(err);
    }

    pub fn connects(&self) -> u32 {
        self.lock().connects
    }

    pub fn searches(&self) -> u32 {
        self.lock().searches
    }

    pub fn closes(&self) -> u32 {
        self.lock().closes
    }

    /// 每次分页请求携带的 cookie（按顺序）
    pub fn cookies(&self) -> Vec<Vec<u8>> {
        self.lock().cookies.clone()
    }

    pub fn connector(&self) -> Arc<dyn Connector> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl Connector for FakeDirectory {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn connect(&self, _params: &ConnectionParams) -> Result<Box<dyn Session>> {
        let mut script = self.lock();
        script.connects += 1;
        if let Some(err) = script.connect_failures.pop_front() {
            return Err(err);
        }
        Ok(Box::new(FakeSession {
            directory: self.clone(),
        }))
    }
}

struct FakeSession {
    directory: FakeDirectory,
}

#[async_trait]
impl Session for FakeSession {
    async fn search(
        &mut self,
        request: &SearchRequest,
        page: Option<&PageRequest>,
    ) -> Result<RawSearchResult> {
        let mut script = self.directory.lock();
        script.searches += 1;
        if let Some(page) = page {
            script.cookies.push(page.cookie.clone());
        }
        if let Some(err) = script.search_failures.pop_front() {
            return Err(err);
        }

        let ids_only = request.attrs.iter().any(|a| a == "1.1");
        let matches: Vec<Entry> = script
            .entries
            .iter()
            .filter(|e| in_scope(&e.dn, &request.base_dn, request.scope))
            .filter(|e| matches_filter(e, &request.filter))
            .map(|e| if ids_only { Entry::new(e.dn.clone()) } else { e.clone() })
            .collect();

        let Some(page) = page else {
            return Ok(RawSearchResult {
                entries: matches,
                cookie: Vec::new(),
            });
        };

        // cookie 即下一页的起始偏移（十进制文本）
        let offset: usize = std::str::from_utf8(&page.cookie)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let end = (offset + page.size as usize).min(matches.len());
        let cookie = if end < matches.len() {
            end.to_string().into_bytes()
        } else {
            Vec::new()
        };
        Ok(RawSearchResult {
            entries: matches.get(offset..end).map(<[Entry]>::to_vec).unwrap_or_default(),
            cookie,
        })
    }

    async fn close(&mut self) {
        self.directory.lock().closes += 1;
    }
}

fn in_scope(entry_dn: &str, base: &str, scope: SearchScope) -> bool {
    match scope {
        SearchScope::Base => entry_dn.eq_ignore_ascii_case(base),
        SearchScope::OneLevel => {
            dn::parent_dn(entry_dn).is_some_and(|p| p.eq_ignore_ascii_case(base))
        }
        SearchScope::Subtree => {
            entry_dn.eq_ignore_ascii_case(base) || dn::is_descendant_of(entry_dn, base)
        }
    }
}

/// 只理解 `(attr=value)` 与 `(attr=*)`；其它过滤器视为全部匹配
fn matches_filter(entry: &Entry, filter: &str) -> bool {
    let inner = filter.trim().trim_start_matches('(').trim_end_matches(')');
    let Some((attr, value)) = inner.split_once('=') else {
        return true;
    };
    if attr.contains(['&', '|', '!']) {
        return true;
    }
    let values = entry.values(attr);
    if value == "*" {
        !values.is_empty()
    } else {
        values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// 100ms 起步、最多 3 次的重试策略
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        enabled: true,
        max_attempts: 3,
        initial_backoff: Duration::from_millis(100),
        max_backoff: Duration::from_millis(1000),
    }
}

pub fn params() -> ConnectionParams {
    ConnectionParams::new("ldap.test", BASE_DN)
        .with_bind("cn=admin,dc=example,dc=com", "secret")
        .with_retry(fast_retry())
}

pub fn timeout() -> DirectoryError {
    DirectoryError::Timeout {
        detail: "operation timed out".to_string(),
    }
}
