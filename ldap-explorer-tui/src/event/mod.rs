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
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘/鼠标等输入事件转换为 Message。
//!
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // 事件处理器
//!         mod keymap;         // 快捷键映射
//!
//!         pub use handler::{handle_event, poll_event};
//!
//!
//!     其中有：
//!         · poll_event      事件轮询，受 ~/app.rs 调用
//!
//!         pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
//!
//!             if event::poll(timeout)? {                  // 此处阻塞以等待事件，最长等待 timeout
//!                 Ok(Some(event::read()?))
//!             } else {
//!                 Ok(None)
//!             }
//!         }
//!
//!
//!         · handle_event    事件分发
//!
//!         接收以下 Event 类型：
//!             Event::Key(KeyEvent)                // 键盘事件
//!             Event::Mouse(MouseEvent)            // 鼠标事件，经 ZoneMap 解析为逻辑目标
//!             Event::Resize(width, height)        // 终端窗口大小发生变化
//!
//!             当接收到键盘事件时，转入 handle_key_event()
//!             判断：
//!                 - 帮助浮层打开时，Esc / ? 关闭它，其余按键忽略
//!                 - 全局快捷键，就地处理；
//!                 - 否则按当前视图分发：
//!                     handle_start_keys / handle_tree_keys / handle_record_keys / handle_query_keys
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 文本编辑与快捷键
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     连接表单和查询输入框需要接收普通字符，
//!     此时 q、?、Tab 等单键快捷键不生效（app.is_editing_text() 为 true），
//!     只有带 Alt / Ctrl 的全局快捷键仍然有效。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 鼠标
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     每一帧渲染时，View 层同时返回一份 ZoneMap：
//!         [(屏幕矩形, ZoneTarget), ...]      // 按绘制顺序
//!
//!     左键点击时，按绘制顺序的逆序查找第一个包含点击位置的矩形，
//!     把它翻译成与键盘操作等价的消息：
//!         ZoneTarget::TreeRow(i)      → TreeMessage::Activate(i)      // 移动光标并展开 / 折叠
//!         ZoneTarget::QueryRow(i)     → QueryMessage::Activate(i)     // 选中并打开详情
//!         ZoneTarget::Tab(view)       → AppMessage::SwitchView(view)
//!         ...
//!
//!     滚轮在列表视图中等价于上下移动光标。
//!
//!
//!     在 src/event/handler.rs 中，有：
//!         pub fn handle_event(event: Event, app: &App, zones: &ZoneMap) -> AppMessage {
//!             ...                                                            ↑↑↑↑↑↑↑↑↑↑
//!             ...                                                            返回一个 AppMessage 类型
//!         }
//!
//!     即，handler.rs 使用 message 层定义的 AppMessage 枚举类型，
//!     创建一个对应的枚举值并返回。
//!     在 src/app.rs 中，有：
//!         let commands = update::update(app, msg);
//!                                            ↑↑↑                    // 在此作为参数传入 update 层
//!
//!
//! Event 层不修改任何状态，它只负责“翻译”。
//!     —— 去往 src/message/mod.rs 吧
//!

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
pub use keymap::DefaultKeymap;
