//! 配置服务
//!
//! 配置文件为 JSON，默认位于 `<config dir>/ldap-explorer/config.json`。
//! 文件不存在时使用默认值；文件存在但格式错误时报错。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ldap_explorer_client::{
    ConnectionParams, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BACKOFF,
    DirectoryError, RetryPolicy, TlsMode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用目录名
const APP_DIR: &str = "ldap-explorer";
/// 配置文件名
const CONFIG_FILE: &str = "config.json";
/// 日志文件名
const LOG_FILE: &str = "ldap-explorer.log";

/// 默认分页大小
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    pub pagination: PaginationConfig,
    pub retry: RetryConfig,
    pub ui: UiConfig,
}

/// 连接配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: String,
    /// 缺省时按 TLS 模式取 389 / 636
    pub port: Option<u16>,
    pub base_dn: String,
    pub tls_mode: TlsMode,
    pub bind_dn: Option<String>,
    pub bind_password: Option<String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub skip_tls_verify: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: None,
            base_dn: String::new(),
            tls_mode: TlsMode::None,
            bind_dn: None,
            bind_password: None,
            connect_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
            skip_tls_verify: false,
        }
    }
}

impl ConnectionConfig {
    /// 实际使用的端口
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.tls_mode.default_port())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// 分页配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// 重试配置（毫秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub enabled: bool,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: u64::try_from(DEFAULT_INITIAL_BACKOFF.as_millis()).unwrap_or(500),
            max_backoff_ms: u64::try_from(DEFAULT_MAX_BACKOFF.as_millis()).unwrap_or(5_000),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            enabled: self.enabled,
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }
}

/// 界面配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// 主循环轮询间隔
    pub tick_rate_ms: u64,
    /// 是否启用鼠标
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            mouse: true,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }
}

impl AppConfig {
    /// 在任何网络调用之前校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.page_size == 0 {
            return Err(ConfigError::Invalid("pagination.page_size must be at least 1".into()));
        }
        self.retry
            .policy()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// 由连接配置构造连接参数
    ///
    /// 仅当配置了 `bind_dn` 时才使用简单绑定，否则为匿名绑定。
    pub fn connection_params(&self) -> Result<ConnectionParams, DirectoryError> {
        let c = &self.connection;
        let mut params = ConnectionParams::new(c.host.trim(), c.base_dn.trim())
            .with_tls_mode(c.tls_mode)
            .with_port(c.effective_port())
            .with_timeouts(c.connect_timeout(), c.request_timeout())
            .with_skip_tls_verify(c.skip_tls_verify)
            .with_retry(self.retry.policy());
        if let Some(dn) = c.bind_dn.as_deref().filter(|dn| !dn.trim().is_empty()) {
            params = params.with_bind(dn.trim(), c.bind_password.clone().unwrap_or_default());
        }
        params.validate()?;
        Ok(params)
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// 默认日志文件路径
pub fn default_log_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE)
}

/// 加载配置
///
/// `path` 为 `None` 时使用默认路径；默认路径下文件不存在不算错误。
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let explicit = path.is_some();
    let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        return Ok(AppConfig::default());
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {
            log::info!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config: AppConfig =
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.pagination.page_size, 50);
        assert!(config.retry.enabled);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.initial_backoff_ms, 500);
        assert_eq!(config.retry.max_backoff_ms, 5_000);
        assert_eq!(config.connection.effective_port(), 389);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn ldaps_defaults_to_636() {
        let mut config = AppConfig::default();
        config.connection.tls_mode = TlsMode::Ldaps;
        assert_eq!(config.connection.effective_port(), 636);
        config.connection.port = Some(1636);
        assert_eq!(config.connection.effective_port(), 1636);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{
            "connection": { "host": "ldap.example.com", "base_dn": "dc=example,dc=com", "tls_mode": "starttls" },
            "retry": { "enabled": false }
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(config.connection.host, "ldap.example.com");
        assert_eq!(config.connection.tls_mode, TlsMode::StartTls);
        assert!(!config.retry.enabled);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.pagination.page_size, 50);
    }

    #[test]
    fn zero_page_size_rejected() {
        let mut config = AppConfig::default();
        config.pagination.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn inverted_backoff_rejected() {
        let mut config = AppConfig::default();
        config.retry.initial_backoff_ms = 10_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn params_anonymous_without_bind_dn() {
        let mut config = AppConfig::default();
        config.connection.base_dn = "dc=example,dc=com".into();
        config.connection.bind_password = Some("ignored".into());
        let params = config.connection_params();
        assert!(params.is_ok_and(|p| p.bind.is_none() && p.url() == "ldap://localhost:389"));
    }

    #[test]
    fn params_require_base_dn() {
        let config = AppConfig::default();
        assert!(matches!(
            config.connection_params(),
            Err(DirectoryError::InvalidInput(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("ldap-explorer-missing-config-for-test.json");
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "ldap-explorer-bad-config-{}.json",
            std::process::id()
        ));
        assert!(fs::write(&path, "{ not json").is_ok());
        let result = load_config(Some(&path));
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
