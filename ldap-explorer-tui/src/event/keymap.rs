//! 快捷键配置
//!
//! 定义可配置的快捷键映射（未来可支持用户自定义）

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 快捷键绑定
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn alt(code: KeyCode) -> Self {
        Self::new(KeyModifiers::ALT, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// 检查按键事件是否匹配此快捷键绑定
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers == self.modifiers && key.code == self.code
    }

    /// 显示在状态栏和帮助中的文本
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{key}")
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            format!("Alt+{key}")
        } else {
            key
        }
    }
}

/// 默认快捷键配置
pub struct DefaultKeymap;

impl DefaultKeymap {
    // 全局
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const ALT_QUIT: KeyBinding = KeyBinding::alt(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));
    pub const HELP: KeyBinding = KeyBinding::alt(KeyCode::Char('h'));
    pub const HELP_KEY: KeyBinding = KeyBinding::key(KeyCode::Char('?'));
    pub const BACK: KeyBinding = KeyBinding::key(KeyCode::Esc);

    // 视图切换
    pub const NEXT_VIEW: KeyBinding = KeyBinding::key(KeyCode::Tab);
    pub const ALT_NEXT_VIEW: KeyBinding = KeyBinding::alt(KeyCode::Char('n'));
    pub const VIEW_START: KeyBinding = KeyBinding::alt(KeyCode::Char('1'));
    pub const VIEW_TREE: KeyBinding = KeyBinding::alt(KeyCode::Char('2'));
    pub const VIEW_RECORD: KeyBinding = KeyBinding::alt(KeyCode::Char('3'));
    pub const VIEW_QUERY: KeyBinding = KeyBinding::alt(KeyCode::Char('4'));

    // 连接表单
    pub const SUBMIT: KeyBinding = KeyBinding::key(KeyCode::Enter);
    pub const TOGGLE_PASSWORD: KeyBinding = KeyBinding::alt(KeyCode::Char('p'));
    pub const DISCONNECT: KeyBinding = KeyBinding::alt(KeyCode::Char('d'));

    // 目录树
    pub const TOGGLE: KeyBinding = KeyBinding::key(KeyCode::Char(' '));
    pub const REFRESH: KeyBinding = KeyBinding::key(KeyCode::Char('r'));
    pub const OPEN_QUERY: KeyBinding = KeyBinding::key(KeyCode::Char('/'));

    // 自定义查询
    pub const LOAD_MORE: KeyBinding = KeyBinding::key(KeyCode::Char('m'));
    pub const CLEAR_FILTER: KeyBinding = KeyBinding::ctrl(KeyCode::Char('u'));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(DefaultKeymap::DISCONNECT.label(), "Alt+d");
        assert_eq!(DefaultKeymap::CLEAR_FILTER.label(), "Ctrl+u");
        assert_eq!(DefaultKeymap::TOGGLE.label(), "Space");
    }
}
