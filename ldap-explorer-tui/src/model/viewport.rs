//! 列表视口
//!
//! 光标与视口顶部的调整规则：
//!     - 光标移到视口顶部之上：视口顶部 = 光标
//!     - 光标移过最后一个可见行：视口顶部前移，使光标成为最后一个可见行
//!     - 视口顶部永不为负（usize 保证）
//!
//! 因而任何一次移动之后都满足 `top <= cursor <= top + height - 1`。

use std::ops::Range;

/// 列表视口状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListViewport {
    cursor: usize,
    top: usize,
    height: usize,
}

impl Default for ListViewport {
    fn default() -> Self {
        Self {
            cursor: 0,
            top: 0,
            height: 1,
        }
    }
}

impl ListViewport {
    /// 当前光标行
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 可见行数
    pub fn height(&self) -> usize {
        self.height
    }

    /// 终端尺寸变化后更新可见行数
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.follow();
    }

    /// 上移 `n` 行
    pub fn move_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
        self.follow();
    }

    /// 下移 `n` 行（不超过最后一行）
    pub fn move_down(&mut self, n: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add(n).min(len - 1);
        self.follow();
    }

    /// 上翻一页
    pub fn page_up(&mut self) {
        self.move_up(self.height);
    }

    /// 下翻一页
    pub fn page_down(&mut self, len: usize) {
        self.move_down(self.height, len);
    }

    /// 跳到第一行
    pub fn first(&mut self) {
        self.cursor = 0;
        self.follow();
    }

    /// 跳到最后一行
    pub fn last(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
        self.follow();
    }

    /// 选中指定行（越界时忽略）
    pub fn select(&mut self, index: usize, len: usize) {
        if index < len {
            self.cursor = index;
            self.follow();
        }
    }

    /// 列表长度变化后把光标收回有效范围
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.top = self.top.min(self.cursor);
        self.follow();
    }

    /// 回到初始位置
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.top = 0;
    }

    /// 当前可见的行区间
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.top.min(len);
        start..(start + self.height).min(len)
    }

    fn follow(&mut self) {
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + self.height {
            self.top = self.cursor + 1 - self.height;
        }
    }
}

#[cfg(test)]
impl ListViewport {
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(1),
            ..Self::default()
        }
    }

    /// 视口顶部行
    pub fn top(&self) -> usize {
        self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariant(vp: &ListViewport) {
        assert!(vp.top() <= vp.cursor());
        assert!(vp.cursor() < vp.top() + vp.height());
    }

    #[test]
    fn moving_past_bottom_scrolls() {
        let mut vp = ListViewport::new(3);
        for _ in 0..4 {
            vp.move_down(1, 10);
        }
        assert_eq!(vp.cursor(), 4);
        assert_eq!(vp.top(), 2);
        assert_invariant(&vp);
    }

    #[test]
    fn moving_above_top_scrolls_back() {
        let mut vp = ListViewport::new(3);
        vp.last(10);
        assert_eq!(vp.top(), 7);
        vp.move_up(5);
        assert_eq!(vp.cursor(), 4);
        assert_eq!(vp.top(), 4);
        assert_invariant(&vp);
    }

    #[test]
    fn top_never_negative() {
        let mut vp = ListViewport::new(5);
        vp.move_up(100);
        assert_eq!((vp.cursor(), vp.top()), (0, 0));
    }

    #[test]
    fn cursor_stops_at_last_row() {
        let mut vp = ListViewport::new(5);
        vp.move_down(100, 3);
        assert_eq!(vp.cursor(), 2);
        vp.move_down(1, 0);
        assert_eq!(vp.cursor(), 2);
    }

    #[test]
    fn invariant_holds_for_any_move_sequence() {
        let mut vp = ListViewport::new(4);
        let len = 25;
        for step in 0..200_usize {
            match step % 7 {
                0 | 3 => vp.move_down(1, len),
                1 => vp.page_down(len),
                2 => vp.move_up(2),
                4 => vp.page_up(),
                5 => vp.select(step % len, len),
                _ => vp.set_height(2 + step % 5),
            }
            assert_invariant(&vp);
        }
    }

    #[test]
    fn shrinking_list_clamps_cursor() {
        let mut vp = ListViewport::new(3);
        vp.last(10);
        vp.clamp(4);
        assert_eq!(vp.cursor(), 3);
        assert_invariant(&vp);
        assert_eq!(vp.visible_range(4), 3..4);
    }

    #[test]
    fn resize_keeps_cursor_visible() {
        let mut vp = ListViewport::new(10);
        vp.select(9, 20);
        vp.set_height(4);
        assert_eq!(vp.top(), 6);
        assert_invariant(&vp);
    }
}
