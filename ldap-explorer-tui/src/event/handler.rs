//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, QueryMessage, RecordMessage, StartMessage, TreeMessage};
use crate::model::{App, FormField, QueryMode, View};
use crate::view::{ZoneMap, ZoneTarget};

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
///
/// `zones` 是上一帧渲染得到的输入区域表。
pub fn handle_event(event: Event, app: &App, zones: &ZoneMap) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app), // 键盘事件
        Event::Mouse(mouse_event) => handle_mouse_event(mouse_event, app, zones), // 鼠标事件
        Event::Resize(width, height) => AppMessage::Resize(width, height), // 终端窗口大小改变
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 重要：只处理 Press 事件，忽略 Release 和 Repeat
    // 避免 Windows 终端上按键重复问题的发生
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if DefaultKeymap::FORCE_QUIT.matches(&key) || DefaultKeymap::ALT_QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    // 帮助浮层打开时只接受关闭
    if app.show_help {
        return if DefaultKeymap::BACK.matches(&key)
            || DefaultKeymap::HELP.matches(&key)
            || DefaultKeymap::HELP_KEY.matches(&key)
        {
            AppMessage::ToggleHelp
        } else {
            AppMessage::Noop
        };
    }

    if let Some(msg) = handle_global_keys(&key, app) {
        return msg;
    }

    match app.view {
        View::Start => handle_start_keys(key, app),
        View::Tree => handle_tree_keys(key),
        View::Record => handle_record_keys(key),
        View::Query => handle_query_keys(key, app),
    }
}

/// 全局快捷键
///
/// 编辑文本时，不带修饰键的单键快捷键不生效。
fn handle_global_keys(key: &KeyEvent, app: &App) -> Option<AppMessage> {
    if DefaultKeymap::HELP.matches(key) {
        return Some(AppMessage::ToggleHelp);
    }
    if DefaultKeymap::ALT_NEXT_VIEW.matches(key) {
        return Some(AppMessage::NextView);
    }

    let jumps = [
        (&DefaultKeymap::VIEW_START, View::Start),
        (&DefaultKeymap::VIEW_TREE, View::Tree),
        (&DefaultKeymap::VIEW_RECORD, View::Record),
        (&DefaultKeymap::VIEW_QUERY, View::Query),
    ];
    if let Some((_, view)) = jumps.iter().find(|(binding, _)| binding.matches(key)) {
        return Some(AppMessage::SwitchView(*view));
    }

    if app.is_editing_text() {
        return None;
    }

    if DefaultKeymap::QUIT.matches(key) {
        return Some(AppMessage::Quit);
    }
    if DefaultKeymap::HELP_KEY.matches(key) {
        return Some(AppMessage::ToggleHelp);
    }
    // 连接表单中 Tab 用于切换字段
    if app.view != View::Start && DefaultKeymap::NEXT_VIEW.matches(key) {
        return Some(AppMessage::NextView);
    }
    None
}

/// 处理连接表单的按键
fn handle_start_keys(key: KeyEvent, app: &App) -> AppMessage {
    if DefaultKeymap::TOGGLE_PASSWORD.matches(&key) {
        return AppMessage::Start(StartMessage::TogglePassword);
    }
    if DefaultKeymap::DISCONNECT.matches(&key) {
        return AppMessage::Start(StartMessage::Disconnect);
    }
    if DefaultKeymap::SUBMIT.matches(&key) {
        return AppMessage::Start(StartMessage::Submit);
    }
    if !is_plain(&key) {
        return AppMessage::Noop;
    }

    let on_tls = app.start.focus == FormField::Tls;
    let msg = match key.code {
        KeyCode::Esc => StartMessage::Cancel,
        KeyCode::Tab | KeyCode::Down => StartMessage::FocusNext,
        KeyCode::BackTab | KeyCode::Up => StartMessage::FocusPrev,
        KeyCode::Left if on_tls => StartMessage::CycleTls(false),
        KeyCode::Right if on_tls => StartMessage::CycleTls(true),
        KeyCode::Char(' ') if on_tls => StartMessage::CycleTls(true),
        KeyCode::Backspace => StartMessage::Backspace,
        KeyCode::Char(c) => StartMessage::Input(c),
        _ => return AppMessage::Noop,
    };
    AppMessage::Start(msg)
}

/// 不带修饰键或仅带 Shift 的按键
fn is_plain(key: &KeyEvent) -> bool {
    key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

/// 处理目录树的按键
fn handle_tree_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::TOGGLE.matches(&key) {
        return AppMessage::Tree(TreeMessage::Toggle);
    }
    if DefaultKeymap::REFRESH.matches(&key) {
        return AppMessage::Tree(TreeMessage::Refresh);
    }
    if DefaultKeymap::OPEN_QUERY.matches(&key) {
        return AppMessage::SwitchView(View::Query);
    }

    let msg = match key.code {
        // ↑ 或 k: 上移
        KeyCode::Up | KeyCode::Char('k') => TreeMessage::CursorUp,
        // ↓ 或 j: 下移
        KeyCode::Down | KeyCode::Char('j') => TreeMessage::CursorDown,
        KeyCode::PageUp => TreeMessage::PageUp,
        KeyCode::PageDown => TreeMessage::PageDown,
        KeyCode::Home | KeyCode::Char('g') => TreeMessage::First,
        KeyCode::End | KeyCode::Char('G') => TreeMessage::Last,
        // → 或 l: 展开
        KeyCode::Right | KeyCode::Char('l') => TreeMessage::Expand,
        // ← 或 h: 折叠（未展开时跳到父节点）
        KeyCode::Left | KeyCode::Char('h') => TreeMessage::Collapse,
        // Enter: 打开详情
        KeyCode::Enter => TreeMessage::OpenRecord,
        // Esc: 清除状态消息
        KeyCode::Esc => return AppMessage::ClearStatus,
        _ => return AppMessage::Noop,
    };
    AppMessage::Tree(msg)
}

/// 处理条目详情的按键
fn handle_record_keys(key: KeyEvent) -> AppMessage {
    let msg = match key.code {
        KeyCode::Up | KeyCode::Char('k') => RecordMessage::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') => RecordMessage::ScrollDown,
        KeyCode::PageUp => RecordMessage::PageUp,
        KeyCode::PageDown => RecordMessage::PageDown,
        KeyCode::Home | KeyCode::Char('g') => RecordMessage::First,
        KeyCode::End | KeyCode::Char('G') => RecordMessage::Last,
        KeyCode::Esc | KeyCode::Backspace => RecordMessage::Back,
        _ => return AppMessage::Noop,
    };
    AppMessage::Record(msg)
}

/// 处理自定义查询的按键
fn handle_query_keys(key: KeyEvent, app: &App) -> AppMessage {
    match app.query.mode() {
        QueryMode::Input => handle_query_input_keys(key),
        QueryMode::Browse => handle_query_browse_keys(key),
    }
}

fn handle_query_input_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::CLEAR_FILTER.matches(&key) {
        return AppMessage::Query(QueryMessage::Clear);
    }
    let msg = match key.code {
        KeyCode::Enter => QueryMessage::Submit,
        KeyCode::Backspace => QueryMessage::Backspace,
        KeyCode::Esc => return AppMessage::SwitchView(View::Tree),
        KeyCode::Char(c) if is_plain(&key) => QueryMessage::Input(c),
        _ => return AppMessage::Noop,
    };
    AppMessage::Query(msg)
}

fn handle_query_browse_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::LOAD_MORE.matches(&key) {
        return AppMessage::Query(QueryMessage::LoadMore);
    }
    let msg = match key.code {
        KeyCode::Up | KeyCode::Char('k') => QueryMessage::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => QueryMessage::CursorDown,
        KeyCode::PageUp => QueryMessage::PageUp,
        KeyCode::PageDown => QueryMessage::PageDown,
        KeyCode::Home | KeyCode::Char('g') => QueryMessage::First,
        KeyCode::End | KeyCode::Char('G') => QueryMessage::Last,
        KeyCode::Enter => QueryMessage::OpenRecord,
        // Esc: 回到输入模式
        KeyCode::Esc => QueryMessage::Cancel,
        _ => return AppMessage::Noop,
    };
    AppMessage::Query(msg)
}

/// 处理鼠标事件
fn handle_mouse_event(mouse: MouseEvent, app: &App, zones: &ZoneMap) -> AppMessage {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.show_help {
                return AppMessage::ToggleHelp;
            }
            zones
                .hit(mouse.column, mouse.row)
                .map_or(AppMessage::Noop, target_message)
        }
        MouseEventKind::ScrollUp => scroll_message(app, true),
        MouseEventKind::ScrollDown => scroll_message(app, false),
        _ => AppMessage::Noop,
    }
}

/// 把点击目标翻译成等价的键盘消息
fn target_message(target: ZoneTarget) -> AppMessage {
    match target {
        ZoneTarget::Tab(view) => AppMessage::SwitchView(view),
        ZoneTarget::TreeRow(index) => AppMessage::Tree(TreeMessage::Activate(index)),
        ZoneTarget::RecordRow(index) => AppMessage::Record(RecordMessage::Select(index)),
        ZoneTarget::QueryRow(index) => AppMessage::Query(QueryMessage::Activate(index)),
        ZoneTarget::FormField(field) => AppMessage::Start(StartMessage::FocusField(field)),
        ZoneTarget::ConnectButton => AppMessage::Start(StartMessage::Submit),
        ZoneTarget::LoadMore => AppMessage::Query(QueryMessage::LoadMore),
        ZoneTarget::HelpOverlay => AppMessage::ToggleHelp,
    }
}

/// 滚轮：在列表视图中移动光标
fn scroll_message(app: &App, up: bool) -> AppMessage {
    if app.show_help {
        return AppMessage::Noop;
    }
    match app.view {
        View::Tree => AppMessage::Tree(if up {
            TreeMessage::CursorUp
        } else {
            TreeMessage::CursorDown
        }),
        View::Record => AppMessage::Record(if up {
            RecordMessage::ScrollUp
        } else {
            RecordMessage::ScrollDown
        }),
        View::Query if app.query.mode() == QueryMode::Browse => AppMessage::Query(if up {
            QueryMessage::CursorUp
        } else {
            QueryMessage::CursorDown
        }),
        _ => AppMessage::Noop,
    }
}
