//! 连接表单状态

use ldap_explorer_client::{ConnectionParams, DirectoryError, TlsMode};

use crate::backend::AppConfig;

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FormField {
    #[default]
    Host,
    Port,
    BaseDn,
    BindDn,
    Password,
    Tls,
}

impl FormField {
    /// 按焦点顺序排列的全部字段
    pub const ALL: [Self; 6] = [
        Self::Host,
        Self::Port,
        Self::BaseDn,
        Self::BindDn,
        Self::Password,
        Self::Tls,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Host => "Host",
            Self::Port => "Port",
            Self::BaseDn => "Base DN",
            Self::BindDn => "Bind DN (empty = anonymous)",
            Self::Password => "Password",
            Self::Tls => "Security",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// 连接表单
#[derive(Debug, Clone, Default)]
pub struct ConnectForm {
    pub host: String,
    pub port: String,
    pub base_dn: String,
    pub bind_dn: String,
    pub password: String,
    pub tls_mode: TlsMode,
    /// 当前焦点字段
    pub focus: FormField,
    /// 是否明文显示密码
    pub show_password: bool,
    /// 正在连接（只接受取消）
    pub connecting: bool,
    /// 最近一次失败信息
    pub error: Option<String>,
}

impl ConnectForm {
    /// 用配置文件中的连接信息预填表单
    pub fn from_config(config: &AppConfig) -> Self {
        let c = &config.connection;
        Self {
            host: c.host.clone(),
            port: c.effective_port().to_string(),
            base_dn: c.base_dn.clone(),
            bind_dn: c.bind_dn.clone().unwrap_or_default(),
            password: c.bind_password.clone().unwrap_or_default(),
            tls_mode: c.tls_mode,
            ..Self::default()
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn focus_field(&mut self, field: FormField) {
        self.focus = field;
    }

    /// 焦点字段的文本（TLS 字段没有文本）
    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Host => Some(&mut self.host),
            FormField::Port => Some(&mut self.port),
            FormField::BaseDn => Some(&mut self.base_dn),
            FormField::BindDn => Some(&mut self.bind_dn),
            FormField::Password => Some(&mut self.password),
            FormField::Tls => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if self.focus == FormField::Port && !c.is_ascii_digit() {
            return;
        }
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn toggle_password(&mut self) {
        self.show_password = !self.show_password;
    }

    /// 切换 TLS 模式
    ///
    /// 端口仍是旧模式的默认端口（或为空）时，跟随切换到新模式的默认端口。
    pub fn cycle_tls(&mut self, forward: bool) {
        let old = self.tls_mode;
        self.tls_mode = if forward { old.next() } else { old.prev() };
        if self.port.is_empty() || self.port == old.default_port().to_string() {
            self.port = self.tls_mode.default_port().to_string();
        }
    }

    /// 构造新的连接参数
    ///
    /// 超时与重试策略取自配置；表单校验失败时不发起任何网络调用。
    pub fn to_params(&self, config: &AppConfig) -> Result<ConnectionParams, DirectoryError> {
        let port = if self.port.trim().is_empty() {
            self.tls_mode.default_port()
        } else {
            self.port
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| DirectoryError::InvalidInput(format!("invalid port: {}", self.port)))?
        };

        let c = &config.connection;
        let mut params = ConnectionParams::new(self.host.trim(), self.base_dn.trim())
            .with_tls_mode(self.tls_mode)
            .with_port(port)
            .with_timeouts(c.connect_timeout(), c.request_timeout())
            .with_skip_tls_verify(c.skip_tls_verify)
            .with_retry(config.retry.policy());
        if !self.bind_dn.trim().is_empty() {
            params = params.with_bind(self.bind_dn.trim(), self.password.clone());
        }
        params.validate()?;
        Ok(params)
    }
}
