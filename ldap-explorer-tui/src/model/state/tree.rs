//! 目录树页面状态
//!
//! 持有根节点以及一份“扁平化”的可见行列表：对树做深度优先前序遍历，
//! 只进入已加载（即已展开）的节点，每行记录缩进层级。
//! 任何加载 / 折叠操作之后都会重建这份列表。

use std::collections::HashSet;

use ldap_explorer_client::TreeNode;

use crate::model::ListViewport;

/// 扁平化后的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub dn: String,
    pub name: String,
    /// 缩进层级（根为 0）
    pub depth: usize,
    /// 子节点已加载（即处于展开状态）
    pub expanded: bool,
    /// 已展开且没有子节点
    pub leaf: bool,
}

/// 目录树页面状态
#[derive(Debug, Default)]
pub struct TreeState {
    root: Option<TreeNode>,
    rows: Vec<TreeRow>,
    /// 正在加载子节点的 DN（小写）
    pending: HashSet<String>,
    pub viewport: ListViewport,
}

impl TreeState {
    /// 以基准 DN 为根创建新树（根尚未加载）
    pub fn new(base_dn: &str) -> Self {
        let mut state = Self {
            root: Some(TreeNode::root(base_dn)),
            ..Self::default()
        };
        state.rebuild();
        state
    }

    /// 断开连接后清空
    pub fn clear(&mut self) {
        self.root = None;
        self.rows.clear();
        self.pending.clear();
        self.viewport.reset();
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    /// 当前选中的行
    pub fn selected(&self) -> Option<&TreeRow> {
        self.rows.get(self.viewport.cursor())
    }

    /// 指定 DN 是否正在加载
    pub fn is_pending(&self, dn: &str) -> bool {
        self.pending.contains(&dn.to_ascii_lowercase())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    // === 光标 ===

    pub fn cursor_up(&mut self) {
        self.viewport.move_up(1);
    }

    pub fn cursor_down(&mut self) {
        self.viewport.move_down(1, self.rows.len());
    }

    pub fn page_up(&mut self) {
        self.viewport.page_up();
    }

    pub fn page_down(&mut self) {
        self.viewport.page_down(self.rows.len());
    }

    pub fn first(&mut self) {
        self.viewport.first();
    }

    pub fn last(&mut self) {
        self.viewport.last(self.rows.len());
    }

    pub fn select(&mut self, index: usize) {
        self.viewport.select(index, self.rows.len());
    }

    // === 展开 / 折叠 ===

    /// 请求展开选中节点
    ///
    /// 返回需要在后台加载子节点的 DN；节点已展开或已在加载中时返回 `None`。
    pub fn expand_selected(&mut self) -> Option<String> {
        let row = self.selected()?;
        if row.expanded {
            return None;
        }
        let dn = row.dn.clone();
        self.mark_pending(&dn).then_some(dn)
    }

    /// 折叠选中节点（同步，丢弃子节点）
    ///
    /// 选中节点未展开时，光标移到其父节点。
    pub fn collapse_selected(&mut self) {
        let Some(row) = self.selected() else {
            return;
        };
        if row.expanded {
            let dn = row.dn.clone();
            if let Some(node) = self.root.as_mut().and_then(|r| r.find_mut(&dn)) {
                node.collapse();
            }
            self.rebuild();
        } else if let Some(parent) = self.parent_row(self.viewport.cursor()) {
            self.viewport.select(parent, self.rows.len());
        }
    }

    /// 展开 / 折叠切换
    pub fn toggle_selected(&mut self) -> Option<String> {
        if self.selected()?.expanded {
            self.collapse_selected();
            None
        } else {
            self.expand_selected()
        }
    }

    /// 刷新选中节点：折叠后重新加载
    pub fn refresh_selected(&mut self) -> Option<String> {
        let dn = self.selected()?.dn.clone();
        if self.is_pending(&dn) {
            return None;
        }
        if let Some(node) = self.root.as_mut().and_then(|r| r.find_mut(&dn)) {
            node.collapse();
        }
        self.rebuild();
        self.mark_pending(&dn).then_some(dn)
    }

    /// 请求加载根节点的子节点（连接建立后调用）
    pub fn expand_root(&mut self) -> Option<String> {
        let root = self.root.as_ref()?;
        if root.is_loaded() {
            return None;
        }
        let dn = root.dn.clone();
        self.mark_pending(&dn).then_some(dn)
    }

    /// 后台加载完成：挂上子节点并重建可见列表
    ///
    /// 节点已不在树中（例如父节点已被折叠）时忽略结果。
    pub fn apply_children(&mut self, dn: &str, children: Vec<TreeNode>) -> bool {
        self.pending.remove(&dn.to_ascii_lowercase());
        let Some(node) = self.root.as_mut().and_then(|r| r.find_mut(dn)) else {
            return false;
        };
        node.set_children(children);
        self.rebuild();
        true
    }

    /// 后台加载失败：只清除加载标记
    pub fn apply_failure(&mut self, dn: &str) {
        self.pending.remove(&dn.to_ascii_lowercase());
    }

    fn mark_pending(&mut self, dn: &str) -> bool {
        self.pending.insert(dn.to_ascii_lowercase())
    }

    /// 离 `index` 最近的、缩进更浅的上方行
    fn parent_row(&self, index: usize) -> Option<usize> {
        let depth = self.rows.get(index)?.depth;
        (0..index).rev().find(|&i| self.rows[i].depth < depth)
    }

    /// 重建可见行列表，并尽量让光标停在原来的 DN 上
    fn rebuild(&mut self) {
        let selected_dn = self.selected().map(|r| r.dn.clone());

        self.rows.clear();
        if let Some(root) = &self.root {
            flatten(root, 0, &mut self.rows);
        }

        let position = selected_dn.and_then(|dn| {
            self.rows
                .iter()
                .position(|r| r.dn.eq_ignore_ascii_case(&dn))
        });
        match position {
            Some(index) => self.viewport.select(index, self.rows.len()),
            None => self.viewport.clamp(self.rows.len()),
        }
    }
}

/// 深度优先前序遍历，只进入已加载的节点
fn flatten(node: &TreeNode, depth: usize, rows: &mut Vec<TreeRow>) {
    let children = node.children();
    rows.push(TreeRow {
        dn: node.dn.clone(),
        name: node.display_name.clone(),
        depth,
        expanded: children.is_some(),
        leaf: children.is_some_and(<[TreeNode]>::is_empty),
    });
    for child in children.unwrap_or_default() {
        flatten(child, depth + 1, rows);
    }
}
