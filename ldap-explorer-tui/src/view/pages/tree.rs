//! 目录树页面视图
//!
//! 每行：缩进 + 标记 + RDN
//!     ▸  未加载（折叠）
//!     ▾  已展开
//!     ·  已展开且没有子节点
//! 正在加载的节点后面追加 "loading..."。

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::model::{App, TreeRow};
use crate::util::truncate_to_width;
use crate::view::theme::Styles;
use crate::view::zones::{ZoneMap, ZoneTarget};

/// 渲染目录树
pub fn render(app: &App, frame: &mut Frame, area: Rect, zones: &mut ZoneMap) {
    let tree = &app.tree;
    let base_dn = app.session.as_ref().map_or("", |s| s.base_dn.as_str());

    let title = if tree.has_pending() {
        format!(" {base_dn} (loading...) ")
    } else {
        format!(" {base_dn} ")
    };
    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = tree.rows();
    if rows.is_empty() {
        if inner.height > 0 {
            frame.render_widget(
                Paragraph::new(Line::styled("Not connected", Styles::muted())),
                inner,
            );
        }
        return;
    }

    let cursor = tree.viewport.cursor();
    for (line, index) in tree.viewport.visible_range(rows.len()).enumerate() {
        let y = inner.y + line as u16;
        if y >= inner.bottom() {
            break;
        }
        let row = &rows[index];
        let area = Rect::new(inner.x, y, inner.width, 1);
        let pending = tree.is_pending(&row.dn);
        frame.render_widget(
            Paragraph::new(row_line(row, pending, usize::from(inner.width))).style(
                if index == cursor {
                    Styles::selected()
                } else {
                    Styles::text()
                },
            ),
            area,
        );
        zones.push(area, ZoneTarget::TreeRow(index));
    }
}

fn row_line(row: &TreeRow, pending: bool, width: usize) -> Line<'static> {
    let marker = if !row.expanded {
        "▸ "
    } else if row.leaf {
        "· "
    } else {
        "▾ "
    };
    let prefix = format!("{}{marker}", "  ".repeat(row.depth));
    let suffix = if pending { " loading..." } else { "" };
    let room = width.saturating_sub(prefix.chars().count() + suffix.len());

    let mut spans = vec![
        Span::styled(prefix, Styles::marker()),
        Span::raw(truncate_to_width(&row.name, room)),
    ];
    if pending {
        spans.push(Span::styled(suffix, Styles::loading()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(expanded: bool, leaf: bool) -> TreeRow {
        TreeRow {
            dn: "ou=people,dc=example,dc=com".into(),
            name: "ou=people".into(),
            depth: 1,
            expanded,
            leaf,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn markers_follow_row_state() {
        assert_eq!(text(&row_line(&row(false, false), false, 40)), "  ▸ ou=people");
        assert_eq!(text(&row_line(&row(true, false), false, 40)), "  ▾ ou=people");
        assert_eq!(text(&row_line(&row(true, true), false, 40)), "  · ou=people");
    }

    #[test]
    fn pending_rows_show_loading() {
        assert!(text(&row_line(&row(false, false), true, 40)).ends_with("loading..."));
    }
}
