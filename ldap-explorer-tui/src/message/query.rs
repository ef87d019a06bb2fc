//! 自定义查询消息

#[derive(Debug, Clone)]
pub enum QueryMessage {
    // 过滤器编辑（Input 模式）
    Input(char),
    Backspace,
    Clear,
    Submit,

    /// 加载下一页
    LoadMore,
    /// 回到 Input 模式
    Cancel,

    // 结果导航（Browse 模式）
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    First,
    Last,
    /// 获取选中条目并打开详情
    OpenRecord,
    /// 鼠标点击第 n 条结果
    Activate(usize),
}
