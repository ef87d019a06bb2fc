//! 帮助浮层
//!
//! 浮层盖在所有视图之上；打开时吞掉除关闭以外的按键（见 event/handler.rs），
//! 并注册一个覆盖整块区域的 HelpOverlay 区域，使点击不会穿透到下层。

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::util::pad_to_width;
use crate::view::layout::centered_rect;
use crate::view::theme::Styles;
use crate::view::zones::{ZoneMap, ZoneTarget};

const KEY_WIDTH: usize = 14;

/// (按键, 说明)；空按键表示分组标题
const ENTRIES: &[(&str, &str)] = &[
    ("", "Global"),
    ("Tab / Alt+n", "Next view"),
    ("Alt+1..4", "Start / Tree / Record / Query"),
    ("? / Alt+h", "Toggle this help"),
    ("q / Ctrl+c", "Quit"),
    ("", "Connect form"),
    ("Tab / ↑↓", "Move between fields"),
    ("←→", "Change security mode"),
    ("Enter", "Connect"),
    ("Alt+p", "Show or hide password"),
    ("Alt+d", "Disconnect"),
    ("", "Tree"),
    ("Space", "Expand or collapse"),
    ("→ / ←", "Expand / collapse"),
    ("Enter", "Open record"),
    ("r", "Reload children"),
    ("/", "Custom query"),
    ("Esc", "Clear status message"),
    ("", "Query"),
    ("Enter", "Search / open result"),
    ("m", "Load more results"),
    ("Esc", "Back to filter"),
];

/// 渲染帮助浮层
pub fn render(frame: &mut Frame, zones: &mut ZoneMap) {
    let height = ENTRIES.len() as u16 + 4;
    let area = centered_rect(56, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_focused());

    let mut lines: Vec<Line> = ENTRIES
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::styled(format!(" {desc}"), Styles::title())
            } else {
                Line::from(vec![
                    Span::styled(pad_to_width(&format!("   {key}"), KEY_WIDTH + 3), Styles::hint_key()),
                    Span::styled(*desc, Styles::hint_desc()),
                ])
            }
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::styled(" Esc or ? to close", Styles::muted()));

    frame.render_widget(Paragraph::new(lines).block(block), area);
    zones.push(area, ZoneTarget::HelpOverlay);
}
