//!
//! src/model/mod.rs
//! Model 层：应用状态定义
//!
//! Model 层是应用状态的 “唯一真相来源”。
//! 这一层只包含数据结构和围绕它们的纯状态操作，不做任何网络调用。
//! 所有状态变更都通过 Update 层来触发。
//!
//!
//! 有模块结构：
//!     src/model/mod.rs
//!         mod app;            // 主应用状态
//!         mod session;        // 当前连接的摘要
//!         mod view;           // 视图枚举（Start / Tree / Record / Query）
//!         mod viewport;       // 列表视口（光标 + 顶部行）
//!
//!         pub mod state;      // 各视图的数据状态
//!
//!     View 与 state/ 的区别：
//!         - View 只标识当前位于哪个视图；
//!         - state/ 中的结构存放各视图的数据（列表、光标、加载标记等）。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、主应用状态（App）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/model/app.rs 中定义：
//!
//!         pub struct App {
//!             pub should_quit: bool,              // 退出标志
//!             pub view: View,                     // 当前视图
//!             pub show_help: bool,                // 帮助浮层
//!             pub status: Option<Status>,         // 状态栏消息
//!
//!             pub start: ConnectForm,             // 连接表单
//!             pub tree: TreeState,                // 目录树
//!             pub record: RecordState,            // 条目详情
//!             pub query: QuerySession,            // 自定义查询
//!
//!             pub session: Option<SessionInfo>,   // 当前连接
//!             pub connecting: Option<u64>,        // 正在进行的连接代次
//!             ...
//!         }
//!
//!     客户端本身不在 Model 中：它由后台 worker 独占（见 src/backend/worker.rs），
//!     Model 只保存 SessionInfo。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、代次（generation）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     每次发起连接都分配一个新的代次。后台返回的每条结果都带着代次：
//!         - 连接结果的代次 ≠ connecting  →  已被取消或超时，丢弃
//!         - 数据结果的代次 ≠ session.generation  →  来自旧连接，丢弃
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 三、视口（ListViewport）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     Tree / Record / Query 的列表共用同一套光标与视口规则，
//!     任何移动之后都满足 top <= cursor <= top + height - 1。
//!
//!
//! Model 层定义了“数据是什么”，但不知道“数据如何改变”。
//!     —— 去往 src/update/mod.rs 吧
//!

mod app;
mod session;
mod view;
mod viewport;

pub mod state;

pub use app::{App, Status, StatusKind};
pub use session::SessionInfo;
pub use state::{
    ConnectForm, FormField, PageFetch, QueryError, QueryMode, QuerySession, RecordRow,
    RecordState, TreeRow, TreeState,
};
pub use view::View;
pub use viewport::ListViewport;
