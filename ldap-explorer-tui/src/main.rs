//! LDAP Explorer TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 配置与后台客户端 worker (`backend/`)
//!
//!
//! main.rs
//! LDAP Explorer TUI 的程序入口
//!
//! 其执行：
//! fn `main()` {
//!
//!     Cli::parse()            // 解析命令行
//!     load_config()           // 读取配置文件，再用命令行覆盖
//!     init_logger()           // 日志写入文件，终端留给 UI
//!     Runtime::new()          // 后台 worker 所在的 tokio 运行时
//!     open_client()           // 仅 --connect 时：在超时限制内先建立连接
//!     ClientWorker::spawn()   // 启动后台 worker
//!     init_terminal()         // 初始化终端
//!     app::run()              // 运行 app.rs 主循环
//!     restore_terminal()      // 无论成功与否，都恢复终端
//!     worker.shutdown()       // 关闭连接
//!
//! }
//!
//!
//! 当启动程序时，main.rs：
//!     `init_terminal()`         // from util/terminal.rs
//!
//!     有：
//!         · enable_raw_mode()
//!             - 以关闭终端行缓冲模式、关闭回显与允许读取单个按键事件
//!         · execute!(io::stdout , EnterAlternateScreen , EnableMouseCapture)?
//!             - 切换到 备用屏幕，并接收鼠标事件
//!         · 返回 Terminal 对象
//!
//!
//!     主循环在 UI 线程上运行，网络调用全部在运行时的 worker 任务里，
//!     二者只通过通道交换 Command 与 AppMessage。
//!
//!
//!     进入主循环 app::run()   // from /app.rs

mod app;
mod backend;
mod cli;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ldap_explorer_client::{Connector, DirectoryClient, LdapConnector};
use tokio::sync::mpsc;

use backend::{AppConfig, ClientWorker, default_log_path, load_config, open_client};
use cli::Cli;
use model::{App, SessionInfo};
use util::{init_terminal, install_panic_hook, restore_terminal};

/// 启动时建立的第一个连接的代次
const INITIAL_GENERATION: u64 = 1;
/// 退出时等待 worker 关闭连接的时间
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    // 1. 解析命令行，日志写入文件（加载配置时已需要记录日志）
    let cli = Cli::parse();
    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_logger(&log_path)?;
    log::info!("Starting ldap-explorer {}", env!("CARGO_PKG_VERSION"));

    // 2. 合并配置
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    // 3. 后台运行时
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let connector = Arc::new(LdapConnector);

    // 4. 可选：在进入 UI 之前先连接；失败时回到连接表单并显示错误
    let mut startup_error = None;
    let initial = if cli.connect {
        match connect_at_startup(&runtime, &config, connector.clone()) {
            Ok(client) => Some((INITIAL_GENERATION, client)),
            Err(e) => {
                log::error!("Initial connection failed: {e:#}");
                startup_error = Some(format!("{e:#}"));
                None
            }
        }
    } else {
        None
    };
    let session = initial
        .as_ref()
        .map(|(generation, client)| SessionInfo::from_client(*generation, client));

    // 5. 启动后台 worker
    let (tx, rx) = mpsc::unbounded_channel();
    let worker = ClientWorker::spawn(runtime.handle(), connector, initial, tx);

    // 6. 初始化终端
    let mouse = config.ui.mouse;
    install_panic_hook();
    let mut terminal = init_terminal(mouse)?;

    // 7. 创建应用实例并运行主循环
    let mut app = App::new(config, session);
    if let Some(error) = startup_error {
        app.fail_connect(error);
    }
    let result = app::run(&mut terminal, &mut app, &worker, rx);

    // 8. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    // 9. 关闭连接
    runtime.block_on(worker.shutdown(SHUTDOWN_GRACE));
    log::info!("Exiting");

    result
}

/// `--connect`：进入 UI 之前按配置建立连接
fn connect_at_startup(
    runtime: &tokio::runtime::Runtime,
    config: &AppConfig,
    connector: Arc<dyn Connector>,
) -> Result<DirectoryClient> {
    let params = config.connection_params()?;
    let timeout = config.connection.connect_timeout();
    let client = runtime.block_on(open_client(params, connector, timeout))?;
    Ok(client)
}

/// 初始化文件日志，级别来自 `RUST_LOG`（默认 info）
fn init_logger(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
