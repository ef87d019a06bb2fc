//! 条目详情页面状态

use ldap_explorer_client::Entry;

use crate::model::{ListViewport, View};

/// 详情页中的一行：属性名 + 一个值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub attribute: String,
    pub value: String,
    /// 是否为该属性的第一个值（渲染时只在第一行显示属性名）
    pub first: bool,
}

/// 条目详情页面状态
#[derive(Debug, Default)]
pub struct RecordState {
    entry: Option<Entry>,
    rows: Vec<RecordRow>,
    /// 正在获取的 DN
    pub loading: Option<String>,
    /// 按 Esc 返回的视图
    pub return_to: View,
    pub viewport: ListViewport,
}

impl RecordState {
    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    /// 开始获取条目
    pub fn begin(&mut self, dn: &str, return_to: View) {
        self.loading = Some(dn.to_string());
        self.return_to = return_to;
    }

    /// 是否正在获取 `dn`
    pub fn is_loading(&self, dn: &str) -> bool {
        self.loading
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case(dn))
    }

    /// 设置条目：属性按名称排序（忽略大小写），每个值一行
    pub fn set_entry(&mut self, entry: Entry) {
        let mut attributes: Vec<(&String, &Vec<String>)> = entry.attributes.iter().collect();
        attributes.sort_by_key(|(name, _)| name.to_ascii_lowercase());

        self.rows = attributes
            .into_iter()
            .flat_map(|(name, values)| {
                values.iter().enumerate().map(move |(i, value)| RecordRow {
                    attribute: name.clone(),
                    value: value.clone(),
                    first: i == 0,
                })
            })
            .collect();
        self.entry = Some(entry);
        self.loading = None;
        self.viewport.reset();
    }

    /// 获取失败
    pub fn fail(&mut self) {
        self.loading = None;
    }

    /// 断开连接后清空
    pub fn clear(&mut self) {
        self.entry = None;
        self.rows.clear();
        self.loading = None;
        self.viewport.reset();
    }

    pub fn scroll_up(&mut self) {
        self.viewport.move_up(1);
    }

    pub fn scroll_down(&mut self) {
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
}
