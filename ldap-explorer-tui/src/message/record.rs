//! 条目详情消息

#[derive(Debug, Clone)]
pub enum RecordMessage {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    First,
    Last,
    /// 鼠标点击第 n 行
    Select(usize),
    /// 返回打开详情前的视图
    Back,
}
