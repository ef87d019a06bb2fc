//! 连接表单页面视图

use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::model::{App, ConnectForm, FormField};
use crate::util::{pad_to_width, tail_to_width, truncate_to_width};
use crate::view::layout::centered_rect;
use crate::view::theme::Styles;
use crate::view::zones::{ZoneMap, ZoneTarget};

/// 标签列宽度（基于显示宽度）
const LABEL_WIDTH: usize = 30;
/// 表单宽度
const FORM_WIDTH: u16 = 76;
/// 字段行 + 空行 + 按钮 + 空行 + 消息行 + 边框
const FORM_HEIGHT: u16 = FormField::ALL.len() as u16 + 6;

const BUTTON: &str = "[ Connect ]";

/// 渲染连接表单
pub fn render(app: &App, frame: &mut Frame, area: Rect, zones: &mut ZoneMap) {
    let form = &app.start;
    let area = centered_rect(FORM_WIDTH, FORM_HEIGHT, area);
    frame.render_widget(Clear, area);

    let title = if form.connecting {
        " Connecting... "
    } else {
        " Connect to directory "
    };
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(if form.connecting {
            Styles::border()
        } else {
            Styles::border_focused()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value_width = usize::from(inner.width).saturating_sub(LABEL_WIDTH + 2);

    for (i, field) in FormField::ALL.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.bottom() {
            return;
        }
        let row = Rect::new(inner.x, y, inner.width, 1);
        let focused = form.focus == *field && !form.connecting;
        let value = field_value(form, *field);
        let shown = if focused {
            tail_to_width(&value, value_width.saturating_sub(1)).to_string()
        } else {
            truncate_to_width(&value, value_width)
        };

        let label_style = if focused {
            Styles::selected()
        } else {
            Styles::muted()
        };
        let line = Line::from(vec![
            Span::styled(pad_to_width(&format!(" {}", field.label()), LABEL_WIDTH), label_style),
            Span::raw("  "),
            Span::styled(shown.clone(), Styles::text()),
        ]);
        frame.render_widget(Paragraph::new(line), row);
        zones.push(row, ZoneTarget::FormField(*field));

        // 文本字段的光标放在末尾
        if focused && *field != FormField::Tls {
            let x = inner.x + (LABEL_WIDTH + 2 + shown.width()) as u16;
            if x < inner.right() {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }

    // 按钮
    let button_y = inner.y + FormField::ALL.len() as u16 + 1;
    if button_y < inner.bottom() {
        let (label, style) = if form.connecting {
            ("Connecting... (Esc to cancel)", Styles::loading())
        } else {
            (BUTTON, Styles::selected())
        };
        let width = (label.width() as u16).min(inner.width);
        let x = inner.x + inner.width.saturating_sub(width) / 2;
        let button = Rect::new(x, button_y, width, 1);
        frame.render_widget(Paragraph::new(Span::styled(label, style)), button);
        if !form.connecting {
            zones.push(button, ZoneTarget::ConnectButton);
        }
    }

    // 错误或当前连接
    let message_y = button_y + 2;
    if message_y < inner.bottom() {
        let line = message_line(app, usize::from(inner.width));
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center),
            Rect::new(inner.x, message_y, inner.width, 1),
        );
    }
}

/// 字段的显示文本（密码默认打码）
fn field_value(form: &ConnectForm, field: FormField) -> String {
    match field {
        FormField::Host => form.host.clone(),
        FormField::Port => form.port.clone(),
        FormField::BaseDn => form.base_dn.clone(),
        FormField::BindDn => form.bind_dn.clone(),
        FormField::Password if form.show_password => form.password.clone(),
        FormField::Password => "•".repeat(form.password.chars().count()),
        FormField::Tls => format!("◀ {} ▶", form.tls_mode.label()),
    }
}

fn message_line(app: &App, width: usize) -> Line<'static> {
    if let Some(error) = &app.start.error {
        return Line::styled(truncate_to_width(error, width), Styles::error());
    }
    match &app.session {
        Some(session) => Line::styled(
            truncate_to_width(
                &format!(
                    "Connected to {} as {} (Alt+d to disconnect)",
                    session.url,
                    session.identity()
                ),
                width,
            ),
            Style::default().fg(crate::view::theme::colors().success),
        ),
        None => Line::styled("Not connected", Styles::muted()),
    }
}
