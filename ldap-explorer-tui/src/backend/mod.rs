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
//！│  │        │               │ TaskMsg   │               ▼               │   │
//！│  │   ┌─────────┐          │ StartMsg  │          ┌──────────┐         │   │
//！│  │   │  View   │          │ QueryMsg  │   ┌───── │  Model   │         │   │
//！│  │   │   层    │          └───────────┘   │      │    层    │         │   │
//！│  │   └────┬────┘ ◀──────── 读取 ──────────┘      └────┬─────┘         │   │
//！│  │        │                                           │               │   │
//！│  └────────│───────────────────────────────────────────│───────────────┘   │
//！│           │                                           │ 异步调用          │
//！│           ▼                                           ▼                   │
//！│      ┌─────────┐                                ┌──────────┐              │
//！│      │  终端   │                                │ Backend  │              │
//！│      │ (Util)  │                                │    层    │              │
//！│      └─────────┘                                └────┬─────┘              │
//！│                                                      │                    │
//！│                                                      ▼                    │
//！│                                           ┌───────────────────┐           │
//！│                                           │  ldap-explorer-   │           │
//！│                                           │      client       │           │
//！│                                           └───────────────────┘           │
//！└─────────────────────────────────────────────────────────────────────────────┘
//!
//!
//! src/backend/mod.rs
//! Backend 层：配置与后台任务
//!
//! Backend 层与 UI 完全解耦。
//! 它负责读取配置，以及在后台执行所有网络调用。
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod config_service;     // 配置文件（JSON）加载与校验
//!         mod worker;             // 独占 DirectoryClient 的后台任务
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、配置服务（config_service）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/backend/config_service.rs 中定义：
//!
//!         AppConfig {
//!             connection,     // host / port / base_dn / tls_mode / bind_dn / 超时
//!             pagination,     // page_size（默认 50）
//!             retry,          // enabled / max_attempts / 退避（默认 3 次，500ms ~ 5000ms）
//!             ui,             // tick_rate_ms / mouse
//!         }
//!
//!         存储位置：~/.config/ldap-explorer/config.json
//!         文件不存在时使用默认值；命令行参数在此之上覆盖。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、后台 worker（ClientWorker）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/backend/worker.rs 中定义：
//!
//!         worker 是运行在 tokio 运行时上的单个任务，独占当前的 DirectoryClient。
//!         主循环通过 Command 通道与它交互，它通过 AppMessage 通道回复。
//!
//!         因为客户端只有一个所有者，所以不需要任何锁；
//!         命令按发送顺序逐条执行。
//!
//!         主要命令：
//!             - Connect           在超时限制内建立新连接，成功后关闭旧连接
//!             - LoadChildren      加载子节点（目录树展开）
//!             - FetchEntry        获取条目（打开详情）
//!             - FetchQueryPage    自定义查询的一页
//!             - Disconnect        关闭指定代次的连接
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 三、数据流
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     用户在目录树上按下 Enter
//!         ↓
//!     Update 层处理 TreeMessage::Toggle，返回 Command::LoadChildren
//!         ↓
//!     主循环把命令交给 ClientWorker
//!         ↓
//!     worker 调用 DirectoryClient::get_children（内部带重试）
//!         ↓
//!     结果包装成 TaskMessage::ChildrenLoaded 发回主循环
//!         ↓
//!     Update 层检查代次后更新 TreeState
//!         ↓
//!     View 层重新渲染
//!

mod config_service;
mod worker;

pub use config_service::{AppConfig, default_log_path, load_config};
pub use worker::{ClientWorker, Command, ConnectError, open_client};
