//!
//! app.rs
//! 应用主循环
//!
//!
//!
//! 在应用启动时，若命令行已经建立连接，App 直接进入 Tree 视图，
//! 否则停在 Start 视图的连接表单：
//!
//! App {
//!
//!     should_quit: bool = false,                      // 决定应用是否应该退出
//!     view: View::Start | View::Tree,                 // 当前视图
//!     start: ConnectForm::from_config(..),            // 用配置预填的表单
//!     session: Option<SessionInfo>,                   // 当前连接
//!     status: None,                                   // 状态栏消息
//!
//! }
//!
//!
//! 主循环大约每 tick（默认 100 ms）执行一次（取决于有无事件）
//! 应用的主循环中有：
//! loop {
//!
//!     zones = terminal.draw(|f| view::render(&app , f))  // 渲染 UI，记下本帧的可点击区域
//!     if app.should_quit{ break }                         // 检查 APP 是否应该退出
//!     if let Some(event) = poll_event() {                 // 轮询获取输入，在此最多等待一个 tick
//!         let msg = handle_event(event , &app , &zones);      // 接收原始事件并分发消息
//!         worker.dispatch(update(&mut app , msg))             // 更新状态，把命令交给后台
//!     }
//!     while let Ok(msg) = results.try_recv() {            // 取回后台完成的任务
//!         worker.dispatch(update(&mut app , msg))
//!     }
//!     update(&mut app , Tick(now))                        // 连接超过截止时间则按超时失败
//! }
//!
//! 后台结果只在主循环里被消费，所以所有状态修改都发生在这一个线程上。

use std::time::Instant;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::backend::ClientWorker;
use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view::{self, ZoneMap};

/// 运行应用主循环
pub fn run(
    terminal: &mut Term,
    app: &mut App,
    worker: &ClientWorker,
    mut results: UnboundedReceiver<AppMessage>,
) -> Result<()> {
    // 先按当前终端尺寸设置视口，再发出初始命令
    let size = terminal.size()?;
    worker.dispatch(update::update(app, AppMessage::Resize(size.width, size.height)));
    worker.dispatch(update::init(app));

    let tick_rate = app.config.ui.tick_rate();
    let mut zones = ZoneMap::new();

    loop {
        // 1. 渲染 UI
        terminal.draw(|frame| {
            zones = view::render(app, frame);
        })?;

        // 2. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 3. 轮询事件（最多一个 tick）
        if let Some(event) = event::poll_event(tick_rate)? {
            // 4. 处理事件，获取消息
            let msg = event::handle_event(event, app, &zones);

            // 5. 更新状态，把产生的命令交给后台
            worker.dispatch(update::update(app, msg));
        }

        // 6. 取回已完成的后台任务
        while let Ok(msg) = results.try_recv() {
            worker.dispatch(update::update(app, msg));
        }

        // 7. 检查连接是否超过截止时间（已送达的结果优先）
        worker.dispatch(update::update(app, AppMessage::Tick(Instant::now())));
    }

    Ok(())
}
