//! 自定义查询页面视图
//!
//! ┌ Filter ─────────────────────────────┐
//! │ (objectClass=person)                │   Input 模式下可编辑
//! └─────────────────────────────────────┘
//! ┌ Results (50, more available) ───────┐
//! │ uid=alice,ou=people,dc=example,...  │
//! │ ...                                 │
//! └──────────────────────── [ More ] ───┘   有更多结果时可点击

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::model::{App, QueryMode, QuerySession};
use crate::util::{tail_to_width, truncate_to_width};
use crate::view::layout::QUERY_INPUT_HEIGHT;
use crate::view::theme::Styles;
use crate::view::zones::{ZoneMap, ZoneTarget};

const MORE_LABEL: &str = "[ m: More ]";

/// 渲染查询页
pub fn render(app: &App, frame: &mut Frame, area: Rect, zones: &mut ZoneMap) {
    let query = &app.query;
    let [input_area, results_area] =
        Layout::vertical([Constraint::Length(QUERY_INPUT_HEIGHT), Constraint::Min(0)]).areas(area);

    render_input(query, frame, input_area);
    render_results(query, frame, results_area, zones);
}

fn render_input(query: &QuerySession, frame: &mut Frame, area: Rect) {
    let editing = query.mode() == QueryMode::Input;
    let block = Block::default()
        .title(" Filter ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(if editing {
            Styles::border_focused()
        } else {
            Styles::border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let width = usize::from(inner.width).saturating_sub(1);
    let shown = tail_to_width(query.filter(), width);
    let line = if query.filter().is_empty() && editing {
        Line::styled("e.g. (objectClass=person)", Styles::muted())
    } else {
        Line::styled(shown.to_string(), Styles::text())
    };
    frame.render_widget(Paragraph::new(line), inner);

    if editing {
        let x = inner.x + shown.width() as u16;
        if x < inner.right() {
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}

fn render_results(query: &QuerySession, frame: &mut Frame, area: Rect, zones: &mut ZoneMap) {
    let results = query.results();
    let title = if query.is_pending() {
        " Results (searching...) ".to_string()
    } else if query.has_more() {
        format!(" Results ({}, more available) ", results.len())
    } else if query.mode() == QueryMode::Browse {
        format!(" Results ({}) ", results.len())
    } else {
        " Results ".to_string()
    };
    let browsing = query.mode() == QueryMode::Browse;
    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(if browsing {
            Styles::border_focused()
        } else {
            Styles::border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    if let Some(error) = &query.last_error {
        let y = inner.bottom() - 1;
        frame.render_widget(
            Paragraph::new(Line::styled(
                truncate_to_width(error, usize::from(inner.width)),
                Styles::error(),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
    }

    if results.is_empty() {
        let hint = match query.mode() {
            QueryMode::Input if query.is_pending() => Line::styled("Searching...", Styles::loading()),
            QueryMode::Input => Line::styled("Press Enter to search", Styles::muted()),
            QueryMode::Browse => Line::styled("No entries match", Styles::muted()),
        };
        frame.render_widget(
            Paragraph::new(hint).alignment(Alignment::Center),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );
    } else {
        let cursor = query.viewport.cursor();
        for (line, index) in query.viewport.visible_range(results.len()).enumerate() {
            let y = inner.y + line as u16;
            if y >= inner.bottom() {
                break;
            }
            let row = Rect::new(inner.x, y, inner.width, 1);
            let style = if index == cursor {
                Styles::selected()
            } else {
                Styles::text()
            };
            frame.render_widget(
                Paragraph::new(truncate_to_width(&results[index].dn, usize::from(inner.width)))
                    .style(style),
                row,
            );
            zones.push(row, ZoneTarget::QueryRow(index));
        }
    }

    // 底部边框上的“加载更多”按钮
    if browsing && query.has_more() && !query.is_pending() {
        let width = (MORE_LABEL.width() as u16).min(area.width.saturating_sub(2));
        let x = area.right().saturating_sub(width + 2);
        let button = Rect::new(x, area.bottom() - 1, width, 1);
        frame.render_widget(Paragraph::new(Line::styled(MORE_LABEL, Styles::hint_key())), button);
        zones.push(button, ZoneTarget::LoadMore);
    }
}
