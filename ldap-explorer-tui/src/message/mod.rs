//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│  ┌────────────────────────────── UI 层 ───────────────────────────────┐   │
//！│  │                                                                     │   │
//！│  │   ┌─────────┐          ┌───────────┐          ┌──────────┐         │   │
//！│  │   │  Event  │ ───────▶ │  Message  │ ───────▶ │  Update  │         │   │
//！│  │   │   层    │   翻译    │    层     │   消费    │    层    │         │   │
//！│  │   └─────────┘          │           │          └────┬─────┘         │   │
//！│  │        ▲               │ AppMessage│               │ 修改          │   │
//！│  │        │               │ StartMsg  │               ▼               │   │
//！│  │   ┌─────────┐          │ TreeMsg   │          ┌──────────┐         │   │
//！│  │   │  View   │          │ QueryMsg  │   ┌───── │  Model   │         │   │
//！│  │   │   层    │          │ TaskMsg   │   │      │    层    │         │   │
//！│  │   └────┬────┘ ◀──────── 读取 ──────────┘      └────┬─────┘         │   │
//！│  │        │               └─────▲─────┘               │ Command       │   │
//！│  └────────│─────────────────────│─────────────────────│───────────────┘   │
//！│           │                     │ TaskMessage         │                   │
//！│           ▼                     │                     ▼                   │
//！│      ┌─────────┐          ┌─────┴─────────────────────────┐               │
//！│      │  终端   │          │   Backend 层（ClientWorker）   │               │
//！│      │ (Util)  │          └───────────────┬───────────────┘               │
//！│      └─────────┘                          │                               │
//！│                                           ▼                               │
//！│                                ┌───────────────────────┐                  │
//！│                                │ ldap-explorer-client  │                  │
//！│                                └───────────────────────┘                  │
//！└─────────────────────────────────────────────────────────────────────────────┘

//!
//! src/message/mod.rs
//! Message 层：事件消息定义
//!
//! 作为 Event —→ Update 之间的桥梁
//! 所有的用户操作和后台任务的结果都通过 Message 来表达。
//! 相当于将形形色色的 Events 翻译成 Update 能够看懂的 Messages
//! Update 层根据 Message 来更新 Model。
//!
//!
//! 有模块结构：
//!     src/message/mod.rs
//!         mod app;
//!         mod start;
//!         mod tree;
//!         mod record;
//!         mod query;
//!         mod task;
//!
//!         pub use app::AppMessage;
//!         ...
//!
//!
//!     在 app::AppMessage 中进行主消息的枚举：
//!         #[derive(Debug, Clone)]
//!
//!         pub enum AppMessage {
//!             Quit,                       // 退出应用
//!             NextView,                   // 循环切换到下一个可进入的视图
//!             SwitchView(View),           // 直接跳转
//!             ToggleHelp,                 // 帮助浮层
//!             Start(StartMessage),        // 连接表单子消息
//!             Tree(TreeMessage),          // 目录树子消息
//!             Record(RecordMessage),      // 条目详情子消息
//!             Query(QueryMessage),        // 自定义查询子消息
//!             Task(TaskMessage),          // 后台任务完成
//!             Resize(u16, u16),           // 终端大小改变
//!             Noop,                       // 无操作，用于代替 Option::None
//!         }
//!
//!
//!     两类来源：
//!         - 输入：src/event/handler.rs 把键盘 / 鼠标事件翻译成 AppMessage
//!         - 后台：src/backend/worker.rs 把每个任务的结果包装成 AppMessage::Task 发回主循环
//!
//!     两类消息走的是同一条 Update 路径，Update 不区分它们来自哪里。
//!
//!
//!     TaskMessage 的每个变体都带着发出任务时的连接代次（generation），
//!     Update 据此丢弃来自旧连接或已取消连接的结果。
//!

mod app;
mod query;
mod record;
mod start;
mod task;
mod tree;

pub use app::AppMessage;
pub use query::QueryMessage;
pub use record::RecordMessage;
pub use start::StartMessage;
pub use task::TaskMessage;
pub use tree::TreeMessage;
