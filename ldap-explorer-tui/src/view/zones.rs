//! 输入区域表
//!
//! 每一帧渲染时重新构建：按绘制顺序记录 (屏幕矩形, 逻辑目标)。
//! 后绘制的区域覆盖先绘制的区域，所以命中测试按逆序进行。

use ratatui::layout::{Position, Rect};

use crate::model::{FormField, View};

/// 可被鼠标点击的逻辑目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTarget {
    /// 标题栏中的视图标签
    Tab(View),
    /// 目录树第 n 行
    TreeRow(usize),
    /// 详情第 n 行
    RecordRow(usize),
    /// 查询结果第 n 条
    QueryRow(usize),
    /// 连接表单字段
    FormField(FormField),
    /// 连接按钮
    ConnectButton,
    /// “加载更多”
    LoadMore,
    /// 帮助浮层
    HelpOverlay,
}

/// 一帧的输入区域表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneMap {
    zones: Vec<(Rect, ZoneTarget)>,
}

impl ZoneMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个区域（空区域忽略）
    pub fn push(&mut self, area: Rect, target: ZoneTarget) {
        if !area.is_empty() {
            self.zones.push((area, target));
        }
    }

    /// 最后绘制的、包含该位置的目标
    pub fn hit(&self, column: u16, row: u16) -> Option<ZoneTarget> {
        let position = Position::new(column, row);
        self.zones
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }
}

#[cfg(test)]
impl ZoneMap {
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rect, ZoneTarget)> {
        self.zones.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_zone_wins_on_overlap() {
        let mut zones = ZoneMap::new();
        zones.push(Rect::new(0, 0, 80, 24), ZoneTarget::TreeRow(0));
        zones.push(Rect::new(10, 5, 20, 10), ZoneTarget::HelpOverlay);

        assert_eq!(zones.hit(15, 7), Some(ZoneTarget::HelpOverlay));
        assert_eq!(zones.hit(2, 2), Some(ZoneTarget::TreeRow(0)));
    }

    #[test]
    fn miss_and_empty_area() {
        let mut zones = ZoneMap::new();
        zones.push(Rect::new(0, 0, 0, 5), ZoneTarget::LoadMore);
        zones.push(Rect::new(0, 1, 10, 1), ZoneTarget::QueryRow(3));

        assert_eq!(zones.len(), 1);
        assert_eq!(zones.hit(5, 1), Some(ZoneTarget::QueryRow(3)));
        // 右边界和下边界不包含在内
        assert_eq!(zones.hit(10, 1), None);
        assert_eq!(zones.hit(5, 2), None);
    }
}
