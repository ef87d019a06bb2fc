//！┌─────────────────────────────────────────────────────────────────────────┐
//！│                           主循环 (app.rs)                                │
//！│                                                                         │
//！│    ┌─────────┐     ┌─────────┐     ┌──────────┐     ┌─────────┐         │
//！│    │ 用户按键 │ ─▶ │  Event  │ ─▶ │ Message  │ ──▶ │ Update  │         │
//！│    └─────────┘     │  层     │     │   层     │     │   层    │          │
//！│         ▲          └─────────┘     └──────────┘     └────┬────┘         │
//！│         │                                                │              │
//！│         │          ┌─────────┐     ┌──────────┐          ▼              │
//！│         │          │  Util   │     │  Model   │ ◀───────────           │
//！│         │          │  层     │     │   层     │                         │
//！│         │          └─────────┘     └────┬─────┘                         │
//！│         │                               │                               │
//！│         │          ┌─────────┐          ▼                               │
//！│         └──────────│  View   │ ◀── 读取状态                             │
//！│           屏幕输出  │   层    │                                          │
//！│                    └─────────┘                                          │
//！└─────────────────────────────────────────────────────────────────────────┘

//!
//! src/util/mod.rs
//! Util 层：基础设施和工具函数
//!
//! Util 层提供与业务逻辑无关的基础设施代码，
//! 主要负责终端的初始化和恢复，以及按显示宽度处理文本。
//!
//!
//! 有模块结构：
//!     src/util/mod.rs
//!         mod terminal;       // 终端初始化和恢复
//!         mod text;           // 按显示宽度截断 / 填充
//!
//!         pub use terminal::{init_terminal, install_panic_hook, restore_terminal, Term};
//!
//!
//!     终端类型定义：
//!         在 src/util/terminal.rs 中，有：
//!
//!             // 类型别名，简化长类型名
//!             pub type Term = Terminal<CrosstermBackend<Stdout>>;
//!
//!
//!     初始化终端：
//!         在 src/util/terminal.rs 中，有：
//!
//!             pub fn init_terminal(mouse: bool) -> Result<Term> {
//!                 enable_raw_mode()?;                             // 1. 启用原始模式
//!                 execute!(stdout, EnterAlternateScreen)?;        // 2. 进入备用屏幕
//!                 if mouse {
//!                     execute!(stdout, EnableMouseCapture)?;      // 3. 捕获鼠标（可在配置中关闭）
//!                 }
//!                 ...                                             // 4. 创建终端对象
//!             }
//!
//!         关键概念：
//!
//!         · Raw Mode（原始模式）
//!             - 关闭行缓冲：无需按 Enter，每个按键立即生效
//!             - 关闭字符回显：按键不会显示在终端上
//!             - 捕获所有按键：包括 Ctrl+C、箭头键等特殊键
//!
//!         · Alternate Screen（备用屏幕）
//!             - TUI 应用在备用屏幕运行
//!             - 退出后自动恢复主屏幕内容（不会覆盖原有内容）
//!
//!         · Mouse Capture（鼠标捕获）
//!             - 点击与滚轮以 Event::Mouse 送达
//!             - 开启后终端自带的文本选择会失效，因此可以关闭
//!
//!
//!     恢复终端：
//!         restore_terminal() 依次关闭鼠标捕获、离开备用屏幕、禁用原始模式。
//!
//!         注意：无论程序是正常退出、发生错误还是 panic，都必须恢复终端！
//!               install_panic_hook() 在默认的 panic 输出之前先恢复终端，
//!               否则 panic 信息会被备用屏幕吞掉。
//!
//!
//!     文本宽度：
//!         CJK 字符在终端中占两列，所以截断和对齐都按 unicode-width 计算的显示宽度进行，
//!         而不是按 char 数或字节数。
//!
//!
//! Util 层在应用启动时初始化终端，在应用退出时恢复终端。
//! 主循环在初始化后的终端中运行。
//!     —— 去往 src/app.rs 主循环吧
//!

mod terminal;
mod text;

pub use terminal::{Term, init_terminal, install_panic_hook, restore_terminal};
pub use text::{pad_to_width, tail_to_width, truncate_to_width};
