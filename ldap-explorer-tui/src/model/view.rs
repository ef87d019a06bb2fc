//! 视图状态定义

/// 顶层视图
///
/// 相当于门牌号：只标识当前位于哪个视图，各视图的数据存放在 `state/` 中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum View {
    /// 连接表单
    #[default]
    Start,
    /// 目录树
    Tree,
    /// 条目详情
    Record,
    /// 自定义查询
    Query,
}

impl View {
    /// 按循环顺序排列的全部视图
    pub const ALL: [Self; 4] = [Self::Start, Self::Tree, Self::Record, Self::Query];

    /// 获取视图标题
    pub fn title(self) -> &'static str {
        match self {
            Self::Start => "Connect",
            Self::Tree => "Tree",
            Self::Record => "Record",
            Self::Query => "Query",
        }
    }

    /// 在 `ALL` 中的位置
    pub fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Tree => 1,
            Self::Record => 2,
            Self::Query => 3,
        }
    }

    /// 循环中的下一个视图（不考虑是否可进入）
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_views() {
        let mut view = View::Start;
        let mut seen = Vec::new();
        for _ in 0..4 {
            view = view.next();
            seen.push(view);
        }
        assert_eq!(seen, [View::Tree, View::Record, View::Query, View::Start]);
    }
}
