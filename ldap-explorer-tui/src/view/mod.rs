//!
//! src/view/mod.rs
//! View 层：把 Model 渲染成一帧
//!
//! View 层只读 App，不修改任何状态。每次渲染除了画出界面，
//! 还会返回这一帧的区域表（ZoneMap），鼠标事件据此映射成消息。
//!
//!
//! 有模块结构：
//!     src/view/mod.rs
//!         mod layout;         // 主布局：标题栏 + 内容区 + 状态栏
//!         mod theme;          // 颜色与样式
//!         mod zones;          // 可点击区域表
//!
//!         mod components;     // 共用组件
//!             help.rs             // 帮助浮层
//!             statusbar.rs        // 底部状态栏
//!
//!         mod pages;          // 各视图页面
//!             start.rs            // 连接表单
//!             tree.rs             // 目录树
//!             record.rs           // 条目详情
//!             query.rs            // 自定义查询
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、布局
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     ┌──────────────────────────────────────────────────────────┐
//!     │  LDAP Explorer  1 Start  2 Tree  3 Record  4 Query       │  ← 标题栏（可点击）
//!     ├──────────────────────────────────────────────────────────┤
//!     │                                                          │
//!     │                     当前视图的页面                        │
//!     │                                                          │
//!     ├──────────────────────────────────────────────────────────┤
//!     │ Space Expand │ Enter Open │ ... │ anonymous @ ldap://... │  ← 状态栏
//!     └──────────────────────────────────────────────────────────┘
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、区域表
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     区域按绘制顺序登记，命中测试按逆序进行：
//!     后绘制的（例如帮助浮层）盖住先绘制的。
//!
//!     列表视口的可见行数由 list_rows() 计算，Update 层在终端尺寸变化时调用它，
//!     保证光标移动的翻页与实际绘制的行数一致。
//!

mod components;
mod layout;
mod pages;
mod theme;
mod zones;

pub use layout::{list_rows, render};
pub use zones::{ZoneMap, ZoneTarget};
