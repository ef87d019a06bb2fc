//! 后台任务结果消息
//!
//! 由 `backend::ClientWorker` 发出；每个变体都携带发出任务时的连接代次。

use ldap_explorer_client::{Entry, SearchPage, TreeNode};

use crate::model::SessionInfo;

#[derive(Debug, Clone)]
pub enum TaskMessage {
    /// 连接建立
    Connected { generation: u64, session: SessionInfo },

    /// 连接失败或超时
    ConnectFailed { generation: u64, error: String },

    /// 子节点加载完成
    ChildrenLoaded {
        generation: u64,
        dn: String,
        children: Vec<TreeNode>,
    },

    /// 子节点加载失败
    ChildrenFailed {
        generation: u64,
        dn: String,
        error: String,
    },

    /// 条目获取完成
    EntryLoaded { generation: u64, entry: Entry },

    /// 条目获取失败
    EntryFailed {
        generation: u64,
        dn: String,
        error: String,
    },

    /// 查询返回一页
    QueryPage {
        generation: u64,
        request_id: u64,
        first: bool,
        page: SearchPage,
    },

    /// 查询失败
    QueryFailed {
        generation: u64,
        request_id: u64,
        error: String,
    },
}
