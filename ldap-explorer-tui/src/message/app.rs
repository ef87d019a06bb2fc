//! 应用主消息枚举

use std::time::Instant;

use super::{QueryMessage, RecordMessage, StartMessage, TaskMessage, TreeMessage};
use crate::model::View;

/// 应用主消息
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// 切换到下一个可进入的视图
    NextView,

    /// 直接跳转到指定视图（不可进入时忽略）
    SwitchView(View),

    /// 显示 / 隐藏帮助
    ToggleHelp,

    /// 清除状态消息
    ClearStatus,

    /// 连接表单相关消息
    Start(StartMessage),

    /// 目录树相关消息
    Tree(TreeMessage),

    /// 条目详情相关消息
    Record(RecordMessage),

    /// 自定义查询相关消息
    Query(QueryMessage),

    /// 后台任务完成
    Task(TaskMessage),

    /// 终端大小改变（宽，高）
    Resize(u16, u16),

    /// 主循环每轮发出一次，携带当前时间（用于连接超时）
    Tick(Instant),

    /// 无操作（用于忽略未处理的事件）
    Noop,
}
