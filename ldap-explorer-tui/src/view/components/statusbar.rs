//! 底部状态栏组件
//!
//! 左侧：当前视图的快捷键提示；右侧：状态消息（错误为红色）或当前连接身份。

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::event::DefaultKeymap;
use crate::model::{App, QueryMode, StatusKind, View};
use crate::util::truncate_to_width;
use crate::view::theme::{Styles, colors};

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let separator = Span::styled(" │ ", Style::default().fg(c.muted));

    // 根据当前视图生成快捷键提示
    let mut spans = Vec::new();
    for (i, (key, desc)) in hints(app).iter().enumerate() {
        if i > 0 {
            spans.push(separator.clone());
        }
        spans.push(Span::styled(key.clone(), Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    // 状态消息优先，其次是当前连接
    let right = match (&app.status, &app.session) {
        (Some(status), _) => {
            let style = match status.kind {
                StatusKind::Error => Style::default().fg(c.error),
                StatusKind::Info => Style::default().fg(c.warning),
            };
            Some(Span::styled(status.text.clone(), style))
        }
        (None, Some(session)) => Some(Span::styled(
            format!("{} @ {}", session.identity(), session.url),
            Style::default().fg(c.success),
        )),
        (None, None) => None,
    };

    if let Some(right) = right {
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let room = usize::from(area.width).saturating_sub(used + 3);
        if room > 0 {
            spans.push(separator);
            spans.push(Span::styled(
                truncate_to_width(&right.content, room),
                right.style,
            ));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Styles::bar()),
        area,
    );
}

/// 根据当前视图生成快捷键提示
fn hints(app: &App) -> Vec<(String, &'static str)> {
    let mut hints = Vec::new();
    let mut push = |key: String, desc: &'static str| hints.push((key, desc));

    match app.view {
        View::Start if app.start.connecting => {
            push(DefaultKeymap::BACK.label(), "Cancel");
        }
        View::Start => {
            push("Tab".into(), "Next field");
            push(DefaultKeymap::SUBMIT.label(), "Connect");
            push(DefaultKeymap::TOGGLE_PASSWORD.label(), "Show password");
            if app.session.is_some() {
                push(DefaultKeymap::DISCONNECT.label(), "Disconnect");
            }
        }
        View::Tree => {
            push("↑↓".into(), "Move");
            push(DefaultKeymap::TOGGLE.label(), "Expand");
            push("Enter".into(), "Open");
            push(DefaultKeymap::REFRESH.label(), "Refresh");
            push(DefaultKeymap::OPEN_QUERY.label(), "Query");
        }
        View::Record => {
            push("↑↓".into(), "Scroll");
            push(DefaultKeymap::BACK.label(), "Back");
        }
        View::Query => match app.query.mode() {
            QueryMode::Input => {
                push(DefaultKeymap::SUBMIT.label(), "Search");
                push(DefaultKeymap::CLEAR_FILTER.label(), "Clear");
                push(DefaultKeymap::BACK.label(), "Tree");
            }
            QueryMode::Browse => {
                push("↑↓".into(), "Move");
                push("Enter".into(), "Open");
                if app.query.has_more() {
                    push(DefaultKeymap::LOAD_MORE.label(), "More");
                }
                push(DefaultKeymap::BACK.label(), "Edit filter");
            }
        },
    }

    push(DefaultKeymap::HELP_KEY.label(), "Help");
    hints
}
