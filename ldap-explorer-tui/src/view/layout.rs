//! 主布局渲染

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::model::{App, View};

use super::components;
use super::pages;
use super::theme::{Styles, colors};
use super::zones::{ZoneMap, ZoneTarget};

/// 标题栏高度
const TITLE_HEIGHT: u16 = 1;
/// 状态栏高度
const STATUS_HEIGHT: u16 = 1;
/// 查询页过滤器输入框高度（含边框）
pub const QUERY_INPUT_HEIGHT: u16 = 3;
/// 列表外框占用的行数
const LIST_BORDER: u16 = 2;

/// 渲染一帧，返回这一帧的输入区域表
pub fn render(app: &App, frame: &mut Frame) -> ZoneMap {
    let mut zones = ZoneMap::new();

    // 三层布局：标题栏 + 主内容区 + 状态栏
    let [title_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(TITLE_HEIGHT), // 标题栏
        Constraint::Min(1),               // 主内容区
        Constraint::Length(STATUS_HEIGHT), // 状态栏
    ])
    .areas(frame.area());

    // 渲染标题栏（视图标签）
    render_title_bar(app, frame, title_area, &mut zones);

    // 根据当前视图渲染内容
    match app.view {
        View::Start => pages::start::render(app, frame, content_area, &mut zones),
        View::Tree => pages::tree::render(app, frame, content_area, &mut zones),
        View::Record => pages::record::render(app, frame, content_area, &mut zones),
        View::Query => pages::query::render(app, frame, content_area, &mut zones),
    }

    // 渲染状态栏
    components::statusbar::render(app, frame, status_area);

    // 渲染帮助浮层（在最上层）
    if app.show_help {
        components::help::render(frame, &mut zones);
    }

    zones
}

/// 列表视图在给定终端高度下的可见行数
///
/// 与各页面的实际布局保持一致，Update 层据此设置视口高度。
pub fn list_rows(view: View, height: u16) -> usize {
    let body = height.saturating_sub(TITLE_HEIGHT + STATUS_HEIGHT);
    let rows = match view {
        View::Query => body.saturating_sub(QUERY_INPUT_HEIGHT + LIST_BORDER),
        View::Start | View::Tree | View::Record => body.saturating_sub(LIST_BORDER),
    };
    usize::from(rows.max(1))
}

/// 渲染标题栏：应用名 + 视图标签
///
/// 不可进入的视图以暗色显示。
fn render_title_bar(app: &App, frame: &mut Frame, area: Rect, zones: &mut ZoneMap) {
    let c = colors();
    let bar = Styles::bar();

    let brand = " LDAP Explorer ";
    let mut spans = vec![Span::styled(brand, bar.add_modifier(Modifier::BOLD))];
    let mut x = area.x + brand.width() as u16;

    for (i, view) in View::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, view.title());
        let style = if *view == app.view {
            Styles::selected()
        } else if app.can_enter(*view) {
            bar
        } else {
            bar.fg(c.muted)
        };
        let width = label.width() as u16;
        zones.push(
            Rect::new(x, area.y, width.min(area.right().saturating_sub(x)), 1),
            ZoneTarget::Tab(*view),
        );
        x = x.saturating_add(width);
        spans.push(Span::styled(label, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
}

/// 计算居中区域
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::backend::AppConfig;
    use crate::model::SessionInfo;

    fn connected() -> App {
        let session = SessionInfo {
            generation: 1,
            url: "ldap://localhost:389".into(),
            base_dn: "dc=example,dc=com".into(),
            bind_dn: None,
        };
        App::new(AppConfig::default(), Some(session))
    }

    fn draw(app: &App, width: u16, height: u16) -> (ZoneMap, String) {
        let mut terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("test backend: {e}"));
        let mut zones = ZoneMap::new();
        terminal
            .draw(|frame| zones = render(app, frame))
            .unwrap_or_else(|e| panic!("draw: {e}"));
        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        (zones, text)
    }

    #[test]
    fn list_rows_match_layout() {
        assert_eq!(list_rows(View::Tree, 24), 20);
        assert_eq!(list_rows(View::Query, 24), 17);
        // 终端过小时至少一行
        assert_eq!(list_rows(View::Query, 3), 1);
    }

    #[test]
    fn tabs_are_clickable() {
        let app = connected();
        let (zones, text) = draw(&app, 80, 24);
        assert!(text.starts_with(" LDAP Explorer "));

        let tabs: Vec<ZoneTarget> = zones
            .iter()
            .filter(|(area, _)| area.y == 0)
            .map(|(_, target)| *target)
            .collect();
        assert_eq!(
            tabs,
            View::ALL.iter().map(|v| ZoneTarget::Tab(*v)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn tree_rows_registered_in_body() {
        let app = connected();
        let (zones, text) = draw(&app, 80, 24);
        assert!(text.contains("dc=example,dc=com"));
        assert_eq!(zones.hit(5, 2), Some(ZoneTarget::TreeRow(0)));
    }

    #[test]
    fn help_overlay_is_hit_first() {
        let mut app = connected();
        app.show_help = true;
        let (zones, text) = draw(&app, 80, 30);
        assert!(text.contains("Help"));
        assert_eq!(zones.hit(40, 15), Some(ZoneTarget::HelpOverlay));
    }

    #[test]
    fn start_form_fields_and_button() {
        let app = App::new(AppConfig::default(), None);
        let (zones, text) = draw(&app, 80, 24);
        assert!(text.contains("localhost"));
        assert!(zones.iter().any(|(_, t)| *t == ZoneTarget::ConnectButton));
        assert!(
            zones
                .iter()
                .any(|(_, t)| *t == ZoneTarget::FormField(crate::model::FormField::Password))
        );
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = connected();
        draw(&app, 10, 3);
        let app = App::new(AppConfig::default(), None);
        draw(&app, 10, 3);
    }
}
