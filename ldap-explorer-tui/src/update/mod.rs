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
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态。
//! 是唯一可以修改 Model 的地方。
//!
//! 与纯粹的状态修改不同，这里的 update 还会返回零到多条后台命令（Command），
//! 由主循环交给 ClientWorker 执行。Update 本身从不等待网络。
//!
//!
//! 有模块结构：
//!     src/update/mod.rs
//!         mod start;          // 连接表单子消息处理
//!         mod tree;           // 目录树子消息处理
//!         mod record;         // 条目详情子消息处理
//!         mod query;          // 自定义查询子消息处理
//!         mod task;           // 后台任务结果处理
//!
//!         pub fn init(app: &mut App) -> Vec<Command> {...}
//!         pub fn update(app: &mut App, msg: AppMessage) -> Vec<Command> {...}
//!
//!
//!         有：
//!             pub fn update(app: &mut App, msg: AppMessage) -> Vec<Command> {
//!                 match msg {
//!                     AppMessage::Quit => {
//!                         app.should_quit = true;
//!                         Vec::new()
//!                     }
//!                     AppMessage::Tree(tree_msg) => tree::update(app, tree_msg),
//!                     AppMessage::Task(task_msg) => task::update(app, task_msg),
//!                     ...
//!                 }
//!             }
//!
//!         —— 的主更新函数。
//!             使用 match 进行穷举，其中每个 Message 变体都对应一个状态变更。
//!             复杂的子消息委托给子模块处理。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 视图状态机
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     Start ⇄ Tree ⇄ Record ⇄ Query（NextView 循环，SwitchView 直接跳转）
//!
//!         - 没有连接时 Tree / Query 不可进入
//!         - 没有已获取的条目时 Record 不可进入
//!         - Start 提交表单：断开旧连接 → 进入“连接中” → Tree（成功）或 Start + 错误（失败 / 超时）
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 后台结果（task.rs）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     每条 TaskMessage 都带着连接代次：
//!         - Connected / ConnectFailed 与 app.connecting 比较
//!         - 其余结果与当前 session 的代次比较
//!     不匹配的结果直接丢弃；迟到的 Connected 会换来一条 Disconnect 命令，
//!     让 worker 关掉这条没人要的连接。
//!
//!
//! Update 完成后，控制权返回主循环（app.rs）。
//! 主循环把返回的命令交给 worker，下一轮循环时 View 层读取更新后的 Model 重新渲染。
//!

mod query;
mod record;
mod start;
mod task;
mod tree;

use std::time::Instant;

use crate::backend::{Command, ConnectError};
use crate::message::AppMessage;
use crate::model::{App, View};
use crate::view::list_rows;

/// 启动时的初始命令：已有连接时加载根节点的子节点
pub fn init(app: &mut App) -> Vec<Command> {
    let Some(generation) = app.session_generation() else {
        return Vec::new();
    };
    app.tree
        .expand_root()
        .map(|dn| Command::LoadChildren { generation, dn })
        .into_iter()
        .collect()
}

/// 处理应用消息，更新状态，返回需要在后台执行的命令
pub fn update(app: &mut App, msg: AppMessage) -> Vec<Command> {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
            Vec::new()
        }

        AppMessage::NextView => {
            let mut view = app.view.next();
            while !app.can_enter(view) {
                view = view.next();
            }
            app.view = view;
            Vec::new()
        }

        AppMessage::SwitchView(view) => {
            if app.can_enter(view) {
                app.view = view;
            } else if view == View::Record {
                app.set_error("No record selected");
            } else {
                app.set_error("Not connected");
            }
            Vec::new()
        }

        AppMessage::ToggleHelp => {
            app.show_help = !app.show_help;
            Vec::new()
        }

        AppMessage::ClearStatus => {
            app.clear_status();
            Vec::new()
        }

        AppMessage::Start(start_msg) => start::update(app, start_msg),

        AppMessage::Tree(tree_msg) => tree::update(app, tree_msg),

        AppMessage::Record(record_msg) => record::update(app, record_msg),

        AppMessage::Query(query_msg) => query::update(app, query_msg),

        AppMessage::Task(task_msg) => task::update(app, task_msg),

        AppMessage::Resize(_, height) => {
            resize(app, height);
            Vec::new()
        }

        AppMessage::Tick(now) => {
            expire_connect(app, now);
            Vec::new()
        }

        AppMessage::Noop => Vec::new(),
    }
}

/// 按终端高度重新计算各列表的可见行数
fn resize(app: &mut App, height: u16) {
    app.tree.viewport.set_height(list_rows(View::Tree, height));
    app.record.viewport.set_height(list_rows(View::Record, height));
    app.query.viewport.set_height(list_rows(View::Query, height));
}

/// 连接超过截止时间仍无结果时按超时失败处理
///
/// 后台可能还在执行排在前面的命令；那次连接迟到的结果会因代次不符被丢弃。
fn expire_connect(app: &mut App, now: Instant) {
    if let Some(generation) = app.expired_connect(now) {
        let timeout = app.config.connection.connect_timeout();
        log::warn!("Connection attempt {generation} exceeded {}ms", timeout.as_millis());
        app.fail_connect(ConnectError::TimedOut(timeout).to_string());
    }
}

/// 放弃当前连接：清空依赖它的状态，返回关闭它的命令
fn drop_session(app: &mut App) -> Option<Command> {
    let session = app.session.take()?;
    app.tree.clear();
    app.record.clear();
    app.query.cancel();
    if app.view != View::Start {
        app.view = View::Start;
    }
    Some(Command::Disconnect {
        generation: session.generation,
    })
}
