//! 各视图的页面渲染

pub mod query;
pub mod record;
pub mod start;
pub mod tree;
