//! 当前连接信息

use ldap_explorer_client::DirectoryClient;

/// 当前连接的摘要
///
/// 客户端本身由后台 worker 独占，Model 中只保留用于显示和校验的信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// 建立该连接的代次，后台结果据此判断是否过期
    pub generation: u64,
    /// `ldap://host:port`
    pub url: String,
    /// 基准 DN
    pub base_dn: String,
    /// 绑定身份；匿名时为 `None`
    pub bind_dn: Option<String>,
}

impl SessionInfo {
    pub fn from_client(generation: u64, client: &DirectoryClient) -> Self {
        let params = client.params();
        Self {
            generation,
            url: params.url(),
            base_dn: params.base_dn.clone(),
            bind_dn: params.bind.as_ref().map(|b| b.dn.clone()),
        }
    }

    /// 状态栏中显示的身份
    pub fn identity(&self) -> &str {
        self.bind_dn.as_deref().unwrap_or("anonymous")
    }
}
