//! 自定义查询会话
//!
//! 两种模式：
//!     - Input：编辑过滤器文本，没有结果
//!     - Browse：只读浏览结果
//!
//! 状态转换：
//!     Input --提交非空过滤器--> 发出首页请求（cookie 为空），成功后进入 Browse 并替换结果
//!     Browse --加载更多（has_more 且无请求在途）--> 携带 cookie 请求下一页，成功后追加结果
//!     Browse --取消--> Input，清空结果、cookie 与 has_more
//!
//! 同一时刻只允许一个请求在途（pending），避免重复使用同一个 cookie。
//! 每个请求带一个递增的 `request_id`，过期的结果直接丢弃。
//! 会话是分页 cookie 的唯一持有者。

use ldap_explorer_client::{Entry, PageCookie, SearchPage};
use thiserror::Error;

use crate::model::ListViewport;

/// 查询模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    #[default]
    Input,
    Browse,
}

/// 提交被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Filter is empty")]
    EmptyFilter,
    #[error("A query is already running")]
    Busy,
}

/// 交给后台执行的一次分页请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFetch {
    pub request_id: u64,
    pub filter: String,
    pub page_size: u32,
    pub cookie: Option<PageCookie>,
    /// 是否为首页（首页替换结果，后续页追加）
    pub first: bool,
}

/// 查询会话状态
#[derive(Debug)]
pub struct QuerySession {
    mode: QueryMode,
    filter: String,
    page_size: u32,
    cookie: Option<PageCookie>,
    has_more: bool,
    pending: bool,
    request_id: u64,
    results: Vec<Entry>,
    /// 最近一次失败的信息
    pub last_error: Option<String>,
    pub viewport: ListViewport,
}

impl QuerySession {
    pub fn new(page_size: u32) -> Self {
        Self {
            mode: QueryMode::Input,
            filter: String::new(),
            page_size: page_size.max(1),
            cookie: None,
            has_more: false,
            pending: false,
            request_id: 0,
            results: Vec::new(),
            last_error: None,
            viewport: ListViewport::default(),
        }
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn results(&self) -> &[Entry] {
        &self.results
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[cfg(test)]
    pub fn has_cookie(&self) -> bool {
        self.cookie.is_some()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 当前选中的结果
    pub fn selected(&self) -> Option<&Entry> {
        self.results.get(self.viewport.cursor())
    }

    // === 过滤器编辑（仅 Input 模式） ===

    pub fn insert_char(&mut self, c: char) {
        if self.mode == QueryMode::Input {
            self.filter.push(c);
            self.filter_changed();
        }
    }

    pub fn backspace(&mut self) {
        if self.mode == QueryMode::Input && self.filter.pop().is_some() {
            self.filter_changed();
        }
    }

    pub fn clear_filter(&mut self) {
        if self.mode == QueryMode::Input {
            self.filter.clear();
            self.filter_changed();
        }
    }

    // === 状态转换 ===

    /// 提交过滤器，返回首页请求
    pub fn submit(&mut self) -> Result<PageFetch, QueryError> {
        if self.pending {
            return Err(QueryError::Busy);
        }
        let filter = self.filter.trim();
        if filter.is_empty() {
            return Err(QueryError::EmptyFilter);
        }
        let filter = filter.to_string();
        self.cookie = None;
        self.has_more = false;
        self.last_error = None;
        Ok(self.issue(filter, None, true))
    }

    /// 加载下一页；没有更多或已有请求在途时为空操作
    pub fn load_more(&mut self) -> Option<PageFetch> {
        if self.mode != QueryMode::Browse || !self.has_more || self.pending {
            return None;
        }
        let cookie = self.cookie.clone()?;
        let filter = self.filter.trim().to_string();
        Some(self.issue(filter, Some(cookie), false))
    }

    /// 应用后台返回的一页；过期或未在等待的结果返回 `false`
    pub fn apply_page(&mut self, request_id: u64, first: bool, page: SearchPage) -> bool {
        if !self.pending || request_id != self.request_id {
            return false;
        }
        self.pending = false;
        if first {
            self.results = page.entries;
            self.mode = QueryMode::Browse;
            self.viewport.reset();
        } else {
            self.results.extend(page.entries);
        }
        self.cookie = page.cookie;
        self.has_more = page.has_more;
        true
    }

    /// 应用后台返回的错误；过期的错误返回 `false`
    pub fn apply_error(&mut self, request_id: u64, error: impl Into<String>) -> bool {
        if !self.pending || request_id != self.request_id {
            return false;
        }
        self.pending = false;
        self.last_error = Some(error.into());
        true
    }

    /// 回到 Input 模式，清空结果与分页状态
    ///
    /// 在途请求的结果会因 `request_id` 变化而被丢弃。
    pub fn cancel(&mut self) {
        self.mode = QueryMode::Input;
        self.results.clear();
        self.cookie = None;
        self.has_more = false;
        self.pending = false;
        self.last_error = None;
        self.request_id += 1;
        self.viewport.reset();
    }

    // === 结果导航 ===

    pub fn cursor_up(&mut self) {
        self.viewport.move_up(1);
    }

    pub fn cursor_down(&mut self) {
        self.viewport.move_down(1, self.results.len());
    }

    pub fn page_up(&mut self) {
        self.viewport.page_up();
    }

    pub fn page_down(&mut self) {
        self.viewport.page_down(self.results.len());
    }

    pub fn first(&mut self) {
        self.viewport.first();
    }

    pub fn last(&mut self) {
        self.viewport.last(self.results.len());
    }

    pub fn select(&mut self, index: usize) {
        self.viewport.select(index, self.results.len());
    }

    fn issue(&mut self, filter: String, cookie: Option<PageCookie>, first: bool) -> PageFetch {
        self.request_id += 1;
        self.pending = true;
        PageFetch {
            request_id: self.request_id,
            filter,
            page_size: self.page_size,
            cookie,
            first,
        }
    }

    fn filter_changed(&mut self) {
        self.cookie = None;
        self.has_more = false;
    }
}
