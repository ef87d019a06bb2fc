//! 命令行参数
//!
//! 命令行只负责把参数合并进配置；合并顺序：默认值 < 配置文件 < 命令行。

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ldap_explorer_client::TlsMode;

use crate::backend::AppConfig;

/// 传输安全模式（命令行写法）
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TlsArg {
    None,
    Ldaps,
    Starttls,
}

impl From<TlsArg> for TlsMode {
    fn from(arg: TlsArg) -> Self {
        match arg {
            TlsArg::None => Self::None,
            TlsArg::Ldaps => Self::Ldaps,
            TlsArg::Starttls => Self::StartTls,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(name = "ldap-explorer", version)]
#[command(about = "Browse and query LDAP directories from the terminal", long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/ldap-explorer/config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory server host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Server port (default: 389, or 636 for ldaps)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base DN of the tree
    #[arg(short, long)]
    pub base_dn: Option<String>,

    /// Bind DN (anonymous when omitted)
    #[arg(short = 'D', long)]
    pub bind_dn: Option<String>,

    /// Bind password
    #[arg(short = 'w', long, env = "LDAP_EXPLORER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Transport security
    #[arg(long, value_enum)]
    pub tls: Option<TlsArg>,

    /// Entries per page in custom queries
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Disable retry and reconnect
    #[arg(long)]
    pub no_retry: bool,

    /// Disable mouse capture
    #[arg(long)]
    pub no_mouse: bool,

    /// Connect before opening the UI
    #[arg(long)]
    pub connect: bool,

    /// Log file (default: <config dir>/ldap-explorer/ldap-explorer.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// 把命令行覆盖项写入配置
    pub fn apply(&self, config: &mut AppConfig) {
        let c = &mut config.connection;
        if let Some(host) = &self.host {
            c.host.clone_from(host);
        }
        if let Some(tls) = self.tls {
            c.tls_mode = tls.into();
        }
        if self.port.is_some() {
            c.port = self.port;
        }
        if let Some(base_dn) = &self.base_dn {
            c.base_dn.clone_from(base_dn);
        }
        if self.bind_dn.is_some() {
            c.bind_dn.clone_from(&self.bind_dn);
        }
        if self.password.is_some() {
            c.bind_password.clone_from(&self.password);
        }
        if let Some(size) = self.page_size {
            config.pagination.page_size = size;
        }
        if self.no_retry {
            config.retry.enabled = false;
        }
        if self.no_mouse {
            config.ui.mouse = false;
        }
    }
}
