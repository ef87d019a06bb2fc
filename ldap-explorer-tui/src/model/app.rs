//! 应用主状态结构

use std::time::{Duration, Instant};

use super::{ConnectForm, QuerySession, RecordState, SessionInfo, TreeState, View};
use crate::backend::AppConfig;

/// 状态栏消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// 状态栏消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

/// 应用主状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 当前视图
    pub view: View,

    /// 是否显示帮助
    pub show_help: bool,

    /// 状态栏消息
    pub status: Option<Status>,

    // === 各视图状态 ===
    /// 连接表单
    pub start: ConnectForm,
    /// 目录树
    pub tree: TreeState,
    /// 条目详情
    pub record: RecordState,
    /// 自定义查询
    pub query: QuerySession,

    /// 当前连接；为 `None` 时 Tree / Query 不可进入
    pub session: Option<SessionInfo>,

    /// 正在进行的连接尝试的代次
    pub connecting: Option<u64>,

    /// 连接尝试的截止时间；过期后即使后台仍在忙也按超时处理
    pub connect_deadline: Option<Instant>,

    /// 生效的配置
    pub config: AppConfig,

    generation: u64,
}

impl App {
    /// 创建新的应用实例
    ///
    /// `session` 为启动前已建立的连接（命令行 `--connect`）。
    pub fn new(config: AppConfig, session: Option<SessionInfo>) -> Self {
        let generation = session.as_ref().map_or(0, |s| s.generation);
        let (view, tree) = match &session {
            Some(s) => (View::Tree, TreeState::new(&s.base_dn)),
            None => (View::Start, TreeState::default()),
        };

        Self {
            should_quit: false,
            view,
            show_help: false,
            status: None,
            start: ConnectForm::from_config(&config),
            tree,
            record: RecordState::default(),
            query: QuerySession::new(config.pagination.page_size),
            session,
            connecting: None,
            connect_deadline: None,
            config,
            generation,
        }
    }

    /// 分配新的连接代次
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// 进入“连接中”：分配新代次并记下截止时间
    pub fn begin_connect(&mut self, now: Instant, timeout: Duration) -> u64 {
        let generation = self.next_generation();
        self.connecting = Some(generation);
        self.connect_deadline = Some(now + timeout);
        self.start.connecting = true;
        self.start.error = None;
        generation
    }

    /// 离开“连接中”，返回被结束的代次
    pub fn end_connect(&mut self) -> Option<u64> {
        self.connect_deadline = None;
        self.start.connecting = false;
        self.connecting.take()
    }

    /// 连接失败或超时：回到连接表单并显示错误
    pub fn fail_connect(&mut self, error: impl Into<String>) {
        let error = error.into();
        self.end_connect();
        self.view = View::Start;
        self.set_error(format!("Connection failed: {error}"));
        self.start.error = Some(error);
    }

    /// 截止时间已过的连接代次
    pub fn expired_connect(&self, now: Instant) -> Option<u64> {
        match (self.connecting, self.connect_deadline) {
            (Some(generation), Some(deadline)) if now >= deadline => Some(generation),
            _ => None,
        }
    }

    /// 当前连接的代次
    pub fn session_generation(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.generation)
    }

    /// 视图当前是否可进入
    pub fn can_enter(&self, view: View) -> bool {
        match view {
            View::Start => true,
            View::Tree | View::Query => self.session.is_some(),
            View::Record => self.record.entry().is_some(),
        }
    }

    /// 当前是否在编辑文本（此时普通字符不作为快捷键）
    pub fn is_editing_text(&self) -> bool {
        match self.view {
            View::Start => !self.start.connecting,
            View::Query => self.query.mode() == super::QueryMode::Input,
            View::Tree | View::Record => false,
        }
    }

    /// 设置状态消息
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            text: message.into(),
            kind: StatusKind::Info,
        });
    }

    /// 设置错误消息
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            text: message.into(),
            kind: StatusKind::Error,
        });
    }

    /// 清除状态消息
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionInfo {
        SessionInfo {
            generation: 7,
            url: "ldap://localhost:389".into(),
            base_dn: "dc=example,dc=com".into(),
            bind_dn: None,
        }
    }

    #[test]
    fn starts_on_connect_form_without_session() {
        let app = App::new(AppConfig::default(), None);
        assert_eq!(app.view, View::Start);
        assert!(!app.can_enter(View::Tree));
        assert!(!app.can_enter(View::Query));
        assert!(!app.can_enter(View::Record));
    }

    #[test]
    fn starts_on_tree_with_session() {
        let mut app = App::new(AppConfig::default(), Some(session()));
        assert_eq!(app.view, View::Tree);
        assert!(app.can_enter(View::Query));
        assert_eq!(app.tree.rows().len(), 1);
        assert_eq!(app.next_generation(), 8);
    }

    #[test]
    fn connect_deadline_expires() {
        let mut app = App::new(AppConfig::default(), None);
        let now = Instant::now();
        let generation = app.begin_connect(now, Duration::from_secs(5));

        assert!(app.start.connecting);
        assert_eq!(app.expired_connect(now + Duration::from_secs(4)), None);
        assert_eq!(app.expired_connect(now + Duration::from_secs(5)), Some(generation));

        assert_eq!(app.end_connect(), Some(generation));
        assert_eq!(app.expired_connect(now + Duration::from_secs(60)), None);
        assert!(!app.start.connecting);
    }

    #[test]
    fn failed_initial_connect_opens_form_with_error() {
        let mut app = App::new(AppConfig::default(), None);
        app.fail_connect("Connection timed out after 5s");

        assert_eq!(app.view, View::Start);
        assert_eq!(app.start.error.as_deref(), Some("Connection timed out after 5s"));
        assert!(app.status.as_ref().is_some_and(|s| {
            s.kind == StatusKind::Error && s.text.contains("timed out")
        }));
        assert!(!app.can_enter(View::Tree));
    }
}
