//! 条目详情页面视图
//!
//! 属性名列按最长属性名对齐，多值属性只在第一行显示属性名：
//!
//!     cn          │ Alice
//!     objectClass │ inetOrgPerson
//!                 │ person

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::model::App;
use crate::util::{pad_to_width, truncate_to_width};
use crate::view::theme::Styles;
use crate::view::zones::{ZoneMap, ZoneTarget};

/// 属性名列的最大宽度
const MAX_ATTRIBUTE_WIDTH: usize = 32;
const SEPARATOR: &str = " │ ";

/// 渲染条目详情
pub fn render(app: &App, frame: &mut Frame, area: Rect, zones: &mut ZoneMap) {
    let record = &app.record;
    let title = match (record.entry(), record.loading.as_deref()) {
        (_, Some(dn)) => format!(" {dn} (loading...) "),
        (Some(entry), None) => format!(" {} ", entry.dn),
        (None, None) => " Record ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = record.rows();
    if rows.is_empty() {
        if inner.height > 0 {
            frame.render_widget(
                Paragraph::new(Line::styled("No attributes", Styles::muted())),
                inner,
            );
        }
        return;
    }

    let name_width = rows
        .iter()
        .map(|r| r.attribute.width())
        .max()
        .unwrap_or(0)
        .min(MAX_ATTRIBUTE_WIDTH);
    let value_width = usize::from(inner.width).saturating_sub(name_width + SEPARATOR.len());

    let cursor = record.viewport.cursor();
    for (line, index) in record.viewport.visible_range(rows.len()).enumerate() {
        let y = inner.y + line as u16;
        if y >= inner.bottom() {
            break;
        }
        let row = &rows[index];
        let name = if row.first {
            truncate_to_width(&row.attribute, name_width)
        } else {
            String::new()
        };
        let spans = vec![
            Span::styled(pad_to_width(&name, name_width), Styles::attribute()),
            Span::styled(SEPARATOR, Styles::muted()),
            Span::raw(truncate_to_width(&row.value, value_width)),
        ];
        let area = Rect::new(inner.x, y, inner.width, 1);
        let style = if index == cursor {
            Styles::selected()
        } else {
            Styles::text()
        };
        frame.render_widget(Paragraph::new(Line::from(spans)).style(style), area);
        zones.push(area, ZoneTarget::RecordRow(index));
    }
}
