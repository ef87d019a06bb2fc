//! 目录树消息

#[derive(Debug, Clone)]
pub enum TreeMessage {
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    First,
    Last,
    /// 展开 / 折叠切换
    Toggle,
    Expand,
    Collapse,
    /// 获取选中条目并打开详情
    OpenRecord,
    /// 折叠后重新加载选中节点
    Refresh,
    /// 鼠标点击第 n 行（移动光标并激活）
    Activate(usize),
}
