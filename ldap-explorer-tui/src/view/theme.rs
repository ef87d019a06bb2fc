//! 主题和样式定义
//!
//! 只有一套深色配色。页面不直接写颜色，而是通过 `Styles` 取样式；
//! 少数需要组合的地方（标题栏、状态栏右侧）才读取 `colors()`。

use ratatui::style::{Color, Modifier, Style};

/// 获取颜色方案
pub fn colors() -> ThemeColors {
    ThemeColors::dark()
}

/// 主题颜色
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// 正文
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,
    /// 标题栏与状态栏底色
    pub bar: Color,
    pub bar_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    /// 属性名列
    pub attribute: Color,
    /// 树中的展开标记
    pub marker: Color,
    /// 已连接
    pub success: Color,
    /// 加载中 / 普通状态消息
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub hint_key: Color,
    pub hint_desc: Color,
}

impl ThemeColors {
    /// 深色主题
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb(212, 212, 212),
            border: Color::Rgb(62, 62, 62),
            border_focused: Color::Rgb(0, 122, 204),
            bar: Color::Rgb(0, 122, 204),
            bar_fg: Color::White,
            selected_bg: Color::Rgb(38, 79, 120),
            selected_fg: Color::White,
            attribute: Color::Rgb(156, 220, 254),
            marker: Color::Rgb(197, 134, 192),
            success: Color::Rgb(78, 201, 176),
            warning: Color::Rgb(206, 145, 120),
            error: Color::Rgb(244, 135, 113),
            muted: Color::Rgb(128, 128, 128),
            hint_key: Color::Yellow,
            hint_desc: Color::Rgb(220, 220, 220),
        }
    }
}

/// 常用样式
pub struct Styles;

impl Styles {
    /// 普通边框样式
    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    /// 聚焦边框样式
    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    /// 选中行
    pub fn selected() -> Style {
        let c = colors();
        Style::default()
            .bg(c.selected_bg)
            .fg(c.selected_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// 块标题
    pub fn title() -> Style {
        Style::default()
            .fg(colors().fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(colors().fg)
    }

    pub fn muted() -> Style {
        Style::default().fg(colors().muted)
    }

    pub fn error() -> Style {
        Style::default().fg(colors().error)
    }

    /// 加载中提示
    pub fn loading() -> Style {
        Style::default()
            .fg(colors().warning)
            .add_modifier(Modifier::ITALIC)
    }

    /// 详情页的属性名
    pub fn attribute() -> Style {
        Style::default().fg(colors().attribute)
    }

    /// 树的缩进与展开标记
    pub fn marker() -> Style {
        Style::default().fg(colors().marker)
    }

    /// 标题栏与状态栏
    pub fn bar() -> Style {
        let c = colors();
        Style::default().bg(c.bar).fg(c.bar_fg)
    }

    /// 快捷键提示样式
    pub fn hint_key() -> Style {
        Style::default()
            .fg(colors().hint_key)
            .add_modifier(Modifier::BOLD)
    }

    /// 快捷键说明样式
    pub fn hint_desc() -> Style {
        Style::default().fg(colors().hint_desc)
    }
}
