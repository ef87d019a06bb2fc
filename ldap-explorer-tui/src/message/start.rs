//! 连接表单消息

use crate::model::FormField;

#[derive(Debug, Clone)]
pub enum StartMessage {
    /// 下一个字段
    FocusNext,
    /// 上一个字段
    FocusPrev,
    /// 鼠标点击某个字段
    FocusField(FormField),
    /// 输入字符
    Input(char),
    /// 删除字符
    Backspace,
    /// 切换 TLS 模式（true 为向后）
    CycleTls(bool),
    /// 显示 / 隐藏密码
    TogglePassword,
    /// 提交表单并连接
    Submit,
    /// 取消正在进行的连接
    Cancel,
    /// 断开当前连接
    Disconnect,
}
